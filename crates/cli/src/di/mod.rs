mod use_cases;

pub use use_cases::build_resolver;

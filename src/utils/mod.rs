pub mod json_cleaner;

pub use json_cleaner::clean_json_response;

// Include tests
#[cfg(test)]
mod tests;

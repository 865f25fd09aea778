//! Output helpers for the command-line shell.
//!
//! - [`estimate_permutations`] / [`format_large_number`] — search-space size for display
//! - [`write_text_report`] / [`save_text_report`] — plain-text result file
//! - `to_json` — JSON form of a result (feature `json`)

mod estimate;
mod text;

pub use estimate::{estimate_permutations, format_large_number, PermutationEstimate, MAX_EXACT_FACTORIAL};
pub use text::{format_path, result_file_name, save_text_report, write_text_report};

#[cfg(feature = "json")]
pub use json::to_json;

#[cfg(feature = "json")]
mod json {
    use crate::error::Result;
    use crate::solver::OracleResult;

    /// Pretty-printed JSON form of `result`.
    pub fn to_json(result: &OracleResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::models::Instance;
        use crate::solver::Oracle;

        #[test]
        fn test_to_json_fields() {
            let instance = Instance::random(5, 7).expect("valid");
            let result = Oracle::default().solve(&instance).expect("valid");
            let json = to_json(&result).expect("serialize");
            let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
            assert_eq!(value["seed"], 7);
            assert_eq!(value["points"].as_array().map(Vec::len), Some(5));
            assert!(value["best"]["distance"].is_number());
        }
    }
}

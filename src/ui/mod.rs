//! UI module for consistent CLI output
//!
//! Uses `cliclack` for interactive prompts with automatic fallback to
//! plain output in CI/non-interactive environments.

mod context;
mod output;
mod prompts;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, outro_success, remark, section, step_error, step_info,
    step_ok, step_warn,
};
pub use prompts::{input, password};

//! Fixed instruction templates wrapped around user code.

/// Ask the model to fill in `TODO` comments and return only the fixed code.
pub fn todo_prompt(code: &str) -> String {
    format!(
        "\n    You are a helpful coding assistant. \n    The following React code contains TODO comments. \n    Please complete the TODOs and return only the fixed code:\n\n    {}\n    ",
        code
    )
}

/// Ask the model to find and fix bugs.
pub fn debug_prompt(code: &str) -> String {
    format!("Debug and fix issues in this code:\n\n{}", code)
}

use crate::interpreter::ExecutionResult;

/// Stand-in body when a command produced nothing at all.
pub const NO_OUTPUT: &str = "(no output)";

/// Fold a result into one entry body: stdout, stderr on its own line, then
/// `(exit N)` when the remote reported a status.
pub fn format_reply(result: &ExecutionResult) -> String {
    let mut out = result.stdout.clone();

    if !result.stderr.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&result.stderr);
    }

    if let Some(code) = result.exit_status {
        out.push_str(&format!("\n(exit {})", code));
    }

    if out.is_empty() {
        NO_OUTPUT.to_string()
    } else {
        out
    }
}

use crate::utils::error::{Result, SheetError};
use std::ffi::OsStr;
use std::process::Output;
use tokio::process::Command;

/// Runs `program` to completion, capturing its output. A binary that cannot be
/// started and a nonzero exit are both errors.
pub async fn run_tool<I, S>(program: &str, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = spawn_tool(program, args).await?;

    if !output.status.success() {
        return Err(SheetError::ToolFailedError {
            tool: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

/// Like [`run_tool`] but hands back the output whatever the exit status.
pub async fn spawn_tool<I, S>(program: &str, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    tracing::debug!("Running {:?}", command.as_std());

    command
        .output()
        .await
        .map_err(|source| SheetError::ToolSpawnError {
            tool: program.to_string(),
            source,
        })
}

use super::*;

pub(in crate::cli) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(in crate::cli) fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

pub(in crate::cli) fn parse_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub(in crate::cli) fn prompt_yes_no<R, W>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(parse_yes(&answer))
}

/// Lines printed by `list`: a count, then one numbered summary per descriptor.
pub(in crate::cli) fn render_listing(repos: &[RepoDescriptor]) -> Vec<String> {
    let mut lines = Vec::with_capacity(repos.len() + 1);
    lines.push(format!("found {} repos", repos.len()));
    for (index, repo) in repos.iter().enumerate() {
        lines.push(format!("{index:3}) {}", repo.summary()));
    }
    lines
}

/// Swaps well-known admin API failures for an operator-facing message.
pub(in crate::cli) fn map_api_error(err: anyhow::Error, context: &str) -> anyhow::Error {
    if let Some(status) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ApiError>())
        .and_then(ApiError::status)
        && let Some(message) = status_message(status, context)
    {
        return anyhow::anyhow!(message);
    }
    if is_network_error(&err) {
        return err.context("admin API unreachable; check --api or IMPORT_ADMIN_API");
    }
    err
}

//! Indentation of a new line.

/// Leading whitespace to give a new line, copied from the line above.
///
/// Returns `None` at the start of the document or when the line above is
/// blank, leaving the new line as it is.
pub fn indent_for(previous_line: Option<&str>) -> Option<String> {
	let previous = previous_line?;
	if previous.trim().is_empty() {
		return None;
	}
	Some(previous.chars().take_while(|c| *c == ' ' || *c == '\t').collect())
}

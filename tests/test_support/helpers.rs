/// Formats one search/replace block the way a model response carries it.
pub fn change_block(search: &str, replace: &str) -> String {
	format!("<<<<<<< SEARCH\n{search}\n=======\n{replace}\n>>>>>>> REPLACE\n")
}

/// A document of `count` numbered lines, each newline-terminated.
pub fn numbered_doc(count: usize) -> String {
	(1..=count).map(|i| format!("line {i}\n")).collect()
}

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Undecodable bytes are substituted with `U+FFFD` instead of failing
/// - Splits on `\n`, `\r\n` and lone `\r`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let bytes = fs::read(filename)?;
	Ok(split_lines(&String::from_utf8_lossy(&bytes)))
}

fn split_lines(contents: &str) -> Vec<String> {
	contents
		.replace("\r\n", "\n")
		.replace('\r', "\n")
		.lines()
		.map(str::to_owned)
		.collect()
}

/// Returns line `index` of a file with trailing whitespace stripped,
/// or an empty string if the file is shorter than that.
pub(crate) fn read_line<P: AsRef<Path>>(filename: P, index: usize) -> io::Result<String> {
	let lines = read_file(filename)?;
	Ok(lines
		.get(index)
		.map(|line| line.trim_end().to_owned())
		.unwrap_or_default())
}

/// Returns the first line of a file with trailing whitespace stripped.
///
/// An empty file yields an empty string.
pub fn first_line<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	read_line(filename, 0)
}

/// Builds the path of the `index`-th sample of a batch by inserting the index
/// immediately before the extension of `base`.
///
/// Examples:
/// - `out/sample.txt` + `0` → `out/sample0.txt`
/// - `notes` + `3` → `notes3`
/// - `.hidden` + `1` → `.hidden1`
pub fn indexed_output_path<P: AsRef<Path>>(base: P, index: usize) -> PathBuf {
	let base = base.as_ref();

	let mut file_name: OsString = base.file_stem().map(OsString::from).unwrap_or_default();
	file_name.push(index.to_string());
	if let Some(extension) = base.extension() {
		file_name.push(".");
		file_name.push(extension);
	}

	match base.parent() {
		Some(parent) => parent.join(file_name),
		None => PathBuf::from(file_name),
	}
}

/// Writes `contents` to `path`, creating the file or replacing whatever it held.
pub(crate) fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> io::Result<()> {
	fs::write(path, contents)
}

/// Returns `true` if both paths designate the same file.
///
/// Paths are compared as written first; when both exist on disk their
/// canonical forms are compared as well.
pub(crate) fn same_file<A: AsRef<Path>, B: AsRef<Path>>(a: A, b: B) -> bool {
	let (a, b) = (a.as_ref(), b.as_ref());
	if a == b {
		return true;
	}
	match (fs::canonicalize(a), fs::canonicalize(b)) {
		(Ok(a), Ok(b)) => a == b,
		_ => false,
	}
}

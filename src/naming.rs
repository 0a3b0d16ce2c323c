//! Output file naming.
//!
//! Every rendered picture is written as `<album name> (<n>).<format>`, where
//! `n` is the picture's 1-based position in the album file:
//!
//! - album `"Holidays"`, first picture, `jpg` → `Holidays (1).jpg`
//! - album `"Holidays"`, tenth picture, `png` → `Holidays (10).png`
//!
//! The format string is used as written in the configuration (minus a
//! leading dot), so `"JPG"` produces `.JPG` files.

/// File name for the picture at 0-based `index` of `album_name`.
pub fn output_file_name(album_name: &str, index: usize, format: &str) -> String {
    let ext = format.trim().trim_start_matches('.');
    format!("{} ({}).{}", sanitize(album_name), index + 1, ext)
}

/// Replace characters that cannot appear in a file name.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

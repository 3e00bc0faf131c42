//! Имя выходного файла.

const FALLBACK_STEM: &str = "extrato";

/// `"Extrato Jan.pdf"` -> `"Extrato Jan.ofx"`. Путь отбрасывается, `..` вычищается.
pub fn ofx_filename(input: &str) -> String {
    let name = input.rsplit(['/', '\\']).next().unwrap_or(input);
    let name = name.replace("..", "");
    let stem = match name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => name.as_str(),
    };
    let stem = stem.trim();
    if stem.is_empty() {
        format!("{FALLBACK_STEM}.ofx")
    } else {
        format!("{stem}.ofx")
    }
}

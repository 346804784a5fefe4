//! Splitting of comma-separated flag values.
//!
//! List-valued flags such as `--input=a.txt,b.txt` arrive as one string.
//! Fields may be wrapped in double quotes to carry embedded commas, and a
//! doubled quote inside a quoted field stands for a literal quote.

/// Splits `text` into its comma-separated fields.
///
/// A trailing comma does not produce an empty final field, but empty fields
/// between commas are kept.
///
/// # Examples
///
/// ```rust
/// use spm_tools::csv::split_csv;
///
/// assert_eq!(split_csv("a.txt,b.txt"), ["a.txt", "b.txt"]);
/// assert_eq!(split_csv(r#""x,y",z"#), ["x,y", "z"]);
/// assert!(split_csv("").is_empty());
/// ```
#[must_use]
pub fn split_csv(text: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = text.chars().peekable();
    while chars.peek().is_some() {
        let mut field = String::new();
        if chars.next_if_eq(&'"').is_some() {
            while let Some(ch) = chars.next() {
                if ch == '"' && chars.next_if_eq(&'"').is_none() {
                    break;
                }
                field.push(ch);
            }
            // Anything between the closing quote and the next comma is dropped.
            for ch in chars.by_ref() {
                if ch == ',' {
                    break;
                }
            }
        } else {
            for ch in chars.by_ref() {
                if ch == ',' {
                    break;
                }
                field.push(ch);
            }
        }
        fields.push(field);
    }
    fields
}

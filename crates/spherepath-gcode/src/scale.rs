//! Uniform rescaling of existing G-code.
//!
//! Scales the X/Y/Z words of every `G1` line in the body of a program and
//! strips its `A` words, leaving a fixed number of header and footer lines
//! untouched.

use tracing::debug;

use crate::error::{GcodeError, Result};

/// Rescale `text` by `factor`.
///
/// The first `header_lines` and last `footer_lines` lines are copied
/// verbatim. Body lines starting with `G1` get their X/Y/Z words multiplied
/// and rewritten with 4 decimals and lose their A words; other body lines
/// are trimmed.
pub fn rescale_gcode(
    text: &str,
    factor: f64,
    header_lines: usize,
    footer_lines: usize,
) -> Result<String> {
    if !(factor.is_finite() && factor > 0.0) {
        return Err(GcodeError::InvalidScale(factor));
    }

    let lines: Vec<&str> = text.lines().collect();
    let required = header_lines.saturating_add(footer_lines);
    if lines.len() <= required {
        return Err(GcodeError::TooShort {
            lines: lines.len(),
            required,
        });
    }

    let body_end = lines.len() - footer_lines;
    let mut output = String::with_capacity(text.len());
    let mut scaled = 0usize;
    for (index, line) in lines.iter().enumerate() {
        if index < header_lines || index >= body_end {
            output.push_str(line);
        } else if line.starts_with("G1") {
            output.push_str(&scale_move(line, factor, index + 1)?);
            scaled += 1;
        } else {
            output.push_str(line.trim());
        }
        output.push('\n');
    }

    debug!(factor, scaled, "rescaled gcode");
    Ok(output)
}

fn scale_move(line: &str, factor: f64, line_number: usize) -> Result<String> {
    let mut words = Vec::new();
    for word in line.split_whitespace() {
        match word.chars().next() {
            Some(axis @ ('X' | 'Y' | 'Z')) => {
                let value: f64 = word[1..].parse().map_err(|_| GcodeError::MalformedWord {
                    line: line_number,
                    word: word.to_string(),
                })?;
                words.push(format!("{axis}{:.4}", value * factor));
            }
            Some('A') => {}
            _ => words.push(word.to_string()),
        }
    }
    Ok(words.join(" "))
}

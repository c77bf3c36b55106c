//! Splitting a raw line into fields

/// Split one line into raw fields.
///
/// A delimiter inside double quotes is literal. A doubled quote `""` yields one
/// literal `"`; any other quote toggles the quoted state and is dropped. An
/// unterminated quote is accepted as-is.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                chars.next();
                field.push('"');
            } else {
                quoted = !quoted;
            }
        } else if c == delimiter && !quoted {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }
    fields.push(field);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_delimiter() {
        assert_eq!(split_line("a,\"b,c\",d", ','), ["a", "b,c", "d"]);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(
            split_line("x,\"he said \"\"hi\"\"\",y", ','),
            ["x", "he said \"hi\"", "y"]
        );
    }

    #[test]
    fn test_trailing_delimiter() {
        assert_eq!(split_line("a,b,", ','), ["a", "b", ""]);
        assert_eq!(split_line(",", ','), ["", ""]);
    }

    #[test]
    fn test_empty_line_is_one_empty_field() {
        assert_eq!(split_line("", ','), [""]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(split_line("a,\"b,c", ','), ["a", "b,c"]);
    }

    #[test]
    fn test_other_delimiters() {
        assert_eq!(split_line("1\t\"x\ty\"\t3", '\t'), ["1", "x\ty", "3"]);
        assert_eq!(split_line("a;b,c", ';'), ["a", "b,c"]);
    }

    #[test]
    fn test_quoted_field_keeps_escaped_edge_quotes() {
        assert_eq!(split_line("1,\"\"\"hi\"\"\"", ','), ["1", "\"hi\""]);
    }
}

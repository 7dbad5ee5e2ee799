//! Interactive symbol-list input.
//!
//! The appraise command accepts symbols as arguments; when none are given it
//! prompts on stdin for a comma-separated list and re-prompts until at least
//! one valid symbol is entered.

use std::io::{self, BufRead, Write};

use tickgauge_core::Symbol;

/// Prompt for a symbol list, re-prompting until the input parses.
pub fn prompt_symbols<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> io::Result<Vec<Symbol>> {
    loop {
        write!(writer, "Enter symbols to appraise, separated by commas: ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no symbols provided before end of input",
            ));
        }

        match Symbol::parse_list(&line) {
            Ok(symbols) => return Ok(symbols),
            Err(error) => writeln!(writer, "invalid input ({error}), please try again")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reprompts_until_input_is_valid() {
        let mut reader = Cursor::new("\n , \nAAPL,MSFT\n");
        let mut prompt_output = Vec::new();

        let symbols = prompt_symbols(&mut reader, &mut prompt_output).expect("must succeed");
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, ["AAPL", "MSFT"]);

        let transcript = String::from_utf8(prompt_output).expect("utf8");
        assert_eq!(transcript.matches("Enter symbols").count(), 3);
        assert!(transcript.contains("please try again"));
    }

    #[test]
    fn invalid_ticker_reprompts_with_the_reason() {
        let mut reader = Cursor::new("9GAG\nAAPL\n");
        let mut prompt_output = Vec::new();

        let symbols = prompt_symbols(&mut reader, &mut prompt_output).expect("must succeed");
        assert_eq!(symbols.len(), 1);

        let transcript = String::from_utf8(prompt_output).expect("utf8");
        assert!(transcript.contains("must start with an ASCII letter"));
    }

    #[test]
    fn end_of_input_without_symbols_is_an_error() {
        let mut reader = Cursor::new("");
        let mut prompt_output = Vec::new();

        let err = prompt_symbols(&mut reader, &mut prompt_output).expect_err("must fail");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}

use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Operator answer to a yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirm,
    Decline,
    /// Anything else; the question is asked again
    Invalid,
}

impl Confirmation {
    /// Parses one line of operator input (`y` / `n`, any case)
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" => Confirmation::Confirm,
            "n" => Confirmation::Decline,
            _ => Confirmation::Invalid,
        }
    }
}

/// Blocking yes/no prompt
pub trait ConfirmPrompt {
    /// Asks `question` until the operator confirms or declines
    ///
    /// Returns `true` on confirm, `false` on decline.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Line-oriented prompt over any reader/writer pair
///
/// End of input counts as a decline.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process terminal
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConfirmPrompt for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            writeln!(self.output, "{} (y/n)?", question)?;
            self.output.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                return Ok(false);
            }

            match Confirmation::parse(&answer) {
                Confirmation::Confirm => return Ok(true),
                Confirmation::Decline => return Ok(false),
                Confirmation::Invalid => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case("y\n", Confirmation::Confirm)]
    #[case("Y", Confirmation::Confirm)]
    #[case(" n \r\n", Confirmation::Decline)]
    #[case("N\n", Confirmation::Decline)]
    #[case("yes\n", Confirmation::Invalid)]
    #[case("\n", Confirmation::Invalid)]
    fn test_parse(#[case] answer: &str, #[case] expected: Confirmation) {
        assert_eq!(Confirmation::parse(answer), expected);
    }

    #[test]
    fn test_reprompts_until_valid() {
        let mut output = Vec::new();
        let mut prompt = LinePrompt::new(Cursor::new("maybe\n\ny\n"), &mut output);
        assert!(prompt.confirm("Continue").unwrap());

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Continue (y/n)?").count(), 3);
    }

    #[test]
    fn test_decline() {
        let mut prompt = LinePrompt::new(Cursor::new("n\n"), Vec::new());
        assert!(!prompt.confirm("Continue").unwrap());
    }

    #[test]
    fn test_end_of_input_declines() {
        let mut prompt = LinePrompt::new(Cursor::new(""), Vec::new());
        assert!(!prompt.confirm("Continue").unwrap());
    }
}

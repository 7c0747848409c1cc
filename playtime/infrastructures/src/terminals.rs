use crate::utils::aliases::Fallible;

/// Line-oriented reader shared by the shell and the credential prompt.
pub struct LineInput<Reader> {
    lines: ::tokio::sync::Mutex<::tokio::io::Lines<Reader>>,
}

impl LineInput<::tokio::io::BufReader<::tokio::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(::tokio::io::BufReader::new(::tokio::io::stdin()))
    }
}

impl<Reader> LineInput<Reader>
where
    Reader: ::tokio::io::AsyncBufRead + ::core::marker::Unpin + ::core::marker::Send,
{
    pub fn new(reader: Reader) -> Self {
        use ::tokio::io::AsyncBufReadExt as _;

        Self { lines: ::tokio::sync::Mutex::new(reader.lines()) }
    }

    /// Prints `prompt` and waits for the next line; `None` at end of input.
    pub async fn read_line(&self, prompt: &str) -> Fallible<Option<String>> {
        use ::tokio::io::AsyncWriteExt as _;

        let mut stdout = ::tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let line = self.lines.lock().await.next_line().await?;

        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_until_end_of_input() {
        let input = LineInput::new(::tokio::io::BufReader::new(&b"total https://youtu.be\r\nquit\n"[..]));

        assert_eq!(input.read_line("> ").await.unwrap().as_deref(), Some("total https://youtu.be"));
        assert_eq!(input.read_line("> ").await.unwrap().as_deref(), Some("quit"));
        assert_eq!(input.read_line("> ").await.unwrap(), None);
    }
}

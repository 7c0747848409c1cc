use ::async_trait::async_trait;
use ::domain::ApiKey;
use ::use_cases::gateways::CredentialProvider;

use crate::terminals::LineInput;
use crate::utils::aliases::Fallible;

const PROMPT: &str = "Please enter your YouTube API Key: ";

/// Asks for the API key on the terminal. Blank input or end of input declines.
#[derive(::bon::Builder)]
pub struct PromptCredentialProvider<Reader> {
    input: ::std::sync::Arc<LineInput<Reader>>,
}

#[async_trait]
impl<Reader> CredentialProvider for PromptCredentialProvider<Reader>
where
    Reader: ::tokio::io::AsyncBufRead + ::core::marker::Unpin + ::core::marker::Send + 'static,
{
    async fn provide(self: ::std::sync::Arc<Self>) -> Fallible<Option<ApiKey>> {
        let line = self.input.read_line(PROMPT).await?;

        let api_key = line.as_deref().and_then(ApiKey::from_input);

        if api_key.is_none() {
            ::tracing::info!("API key prompt declined");
        }

        Ok(api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(input: &'static [u8]) -> ::std::sync::Arc<PromptCredentialProvider<::tokio::io::BufReader<&'static [u8]>>> {
        let input = ::std::sync::Arc::new(LineInput::new(::tokio::io::BufReader::new(input)));

        ::std::sync::Arc::new(PromptCredentialProvider::builder().input(input).build())
    }

    #[tokio::test]
    async fn trims_the_entered_key() {
        let api_key = provider(b"  AIzaSyExample \n").provide().await.unwrap();

        assert_eq!(api_key.unwrap().expose(), "AIzaSyExample");
    }

    #[tokio::test]
    async fn blank_input_declines() {
        assert!(provider(b"   \n").provide().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn end_of_input_declines() {
        assert!(provider(b"").provide().await.unwrap().is_none());
    }
}

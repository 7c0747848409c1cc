use ::infrastructures::boundaries::TerminalView;
use ::infrastructures::terminals::LineInput;
use ::use_cases::boundaries::Accept;
use ::use_cases::boundaries::CalculatePlaylistDurationRequestModel;
use ::use_cases::boundaries::ListPlaylistVideosRequestModel;
use ::use_cases::gateways::CredentialProvider;
use ::use_cases::interactors::CalculatePlaylistDurationInteractor;
use ::use_cases::interactors::ListPlaylistVideosInteractor;
use ::use_cases::sessions::Session;

use crate::utils::aliases::Fallible;

pub type StdinInput = LineInput<::tokio::io::BufReader<::tokio::io::Stdin>>;

const PROMPT: &str = "playtime> ";

const HELP: &str = "\
Commands:
  total <url>        print the total duration of a playlist
  list <url>         list the videos of a playlist
  toggle <n>...      mark videos as watched or unwatched
  show               print the listed videos again
  remaining          print the duration of the unwatched videos
  key                enter a new API key
  help               print this message
  quit               leave";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Total(String),
    List(String),
    Toggle(Vec<usize>),
    Show,
    Remaining,
    Key,
    Help,
    Quit,
    Nothing,
}

impl ::std::str::FromStr for ShellCommand {
    type Err = ::anyhow::Error;

    fn from_str(line: &str) -> Fallible<Self> {
        let mut words = line.split_whitespace();

        let Some(command) = words.next() else {
            return Ok(Self::Nothing);
        };

        let arguments: Vec<&str> = words.collect();

        let command = match (command.to_ascii_lowercase().as_str(), arguments.as_slice()) {
            ("total", [url]) => Self::Total((*url).to_owned()),
            ("total", _) => ::anyhow::bail!("Usage: total <url>"),

            ("list", [url]) => Self::List((*url).to_owned()),
            ("list", _) => ::anyhow::bail!("Usage: list <url>"),

            ("toggle", []) => ::anyhow::bail!("Usage: toggle <n>..."),
            ("toggle", positions) => Self::Toggle(
                positions
                    .iter()
                    .map(|position| {
                        position
                            .parse::<usize>()
                            .map_err(|_| ::anyhow::anyhow!("Not a video number: {}", position))
                    })
                    .collect::<Fallible<_>>()?,
            ),

            ("show", []) => Self::Show,
            ("remaining", []) => Self::Remaining,
            ("key", []) => Self::Key,
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit", _) => Self::Quit,

            (command, _) => ::anyhow::bail!("Unknown command: {} (try `help`)", command),
        };

        Ok(command)
    }
}

#[derive(::bon::Builder)]
pub struct Shell {
    input: ::std::sync::Arc<StdinInput>,
    view: ::std::sync::Arc<TerminalView>,

    session: ::std::sync::Arc<Session>,
    credentials: ::std::sync::Arc<dyn CredentialProvider>,

    calculate_playlist_duration: ::std::sync::Arc<CalculatePlaylistDurationInteractor>,
    list_playlist_videos: ::std::sync::Arc<ListPlaylistVideosInteractor>,
}

impl Shell {
    pub async fn run(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        println!("{}", HELP);

        while let Some(line) = self.input.read_line(PROMPT).await? {
            let outcome = match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => ::std::sync::Arc::clone(&self).execute(command).await,
                Err(err) => Err(err),
            };

            if let Err(err) = outcome {
                ::tracing::warn!(error = %err, "Shell command failed");
                self.view.report(&err);
            }
        }

        ::tracing::info!("Shell closed");

        Ok(())
    }

    async fn execute(self: ::std::sync::Arc<Self>, command: ShellCommand) -> Fallible<()> {
        use ::colored::Colorize as _;

        match command {
            ShellCommand::Total(url) => {
                let request = CalculatePlaylistDurationRequestModel::builder().url(url).build();
                ::std::sync::Arc::clone(&self.calculate_playlist_duration).accept(request).await
            },
            ShellCommand::List(url) => {
                let request = ListPlaylistVideosRequestModel::builder().url(url).build();
                ::std::sync::Arc::clone(&self.list_playlist_videos).accept(request).await
            },
            ShellCommand::Toggle(positions) => self.view.toggle(&positions).await,
            ShellCommand::Show => self.view.show().await,
            ShellCommand::Remaining => self.view.remaining().await,
            ShellCommand::Key => {
                match ::std::sync::Arc::clone(&self.credentials).provide().await? {
                    Some(api_key) => {
                        self.session.set_api_key(Some(api_key)).await;
                        println!("{}", "API key set.".green());
                    },
                    None => println!("{}", "API key unchanged.".yellow()),
                }

                Ok(())
            },
            ShellCommand::Help => {
                println!("{}", HELP);
                Ok(())
            },
            ShellCommand::Quit | ShellCommand::Nothing => Ok(()),
        }
    }
}

pub(crate) mod shell;
pub(crate) mod utils;

use ::domain::ApiKey;
use ::infrastructures::boundaries::TerminalView;
use ::infrastructures::gateways::credentials::PromptCredentialProvider;
use ::infrastructures::gateways::youtube::YoutubeDataApiGateway;
use ::infrastructures::gateways::youtube::DEFAULT_BASE_URL;
use ::use_cases::aggregators::PlaylistAggregator;
use ::use_cases::boundaries::Accept;
use ::use_cases::boundaries::CalculatePlaylistDurationOutputBoundary;
use ::use_cases::boundaries::CalculatePlaylistDurationRequestModel;
use ::use_cases::boundaries::ListPlaylistVideosOutputBoundary;
use ::use_cases::boundaries::ListPlaylistVideosRequestModel;
use ::use_cases::gateways::CredentialProvider;
use ::use_cases::gateways::PlaylistItemsGateway;
use ::use_cases::gateways::VideoDetailsGateway;
use ::use_cases::interactors::CalculatePlaylistDurationInteractor;
use ::use_cases::interactors::ListPlaylistVideosInteractor;
use ::use_cases::sessions::Session;

use crate::shell::Shell;
use crate::shell::StdinInput;
use crate::utils::aliases::Fallible;
use crate::utils::extensions::OptionExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Fallible<()> {
    let matches = command().get_matches();

    let log_directory = matches.get_one::<::std::path::PathBuf>("log-directory").ok()?;

    let writer = ::tracing_appender::rolling::daily(log_directory, "playtime.log");
    let (writer, _guard) = ::tracing_appender::non_blocking(writer);

    ::tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            ::tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| ::tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .init();

    let input = ::std::sync::Arc::new(StdinInput::stdin());

    let credentials: ::std::sync::Arc<dyn CredentialProvider> =
        ::std::sync::Arc::new(PromptCredentialProvider::builder().input(::std::sync::Arc::clone(&input)).build());

    let api_key = matches
        .get_one::<::std::string::String>("api-key")
        .and_then(|api_key| ApiKey::from_input(api_key));

    let session = ::std::sync::Arc::new(Session::with_api_key(::std::sync::Arc::clone(&credentials), api_key));

    let youtube = ::std::sync::Arc::new(
        YoutubeDataApiGateway::builder()
            .base_url(matches.get_one::<::url::Url>("api-base-url").ok()?.clone())
            .timeout(::std::time::Duration::from_secs(*matches.get_one::<u64>("timeout").ok()?))
            .build()?,
    );

    let aggregator = ::std::sync::Arc::new(
        PlaylistAggregator::builder()
            .playlist_items(::std::sync::Arc::clone(&youtube) as ::std::sync::Arc<dyn PlaylistItemsGateway>)
            .video_details(::std::sync::Arc::clone(&youtube) as ::std::sync::Arc<dyn VideoDetailsGateway>)
            .build(),
    );

    let view = ::std::sync::Arc::new(TerminalView::new());

    let calculate_playlist_duration_interactor = ::std::sync::Arc::new(
        CalculatePlaylistDurationInteractor::builder()
            .view(::std::sync::Arc::clone(&view) as ::std::sync::Arc<dyn CalculatePlaylistDurationOutputBoundary>)
            .session(::std::sync::Arc::clone(&session))
            .aggregator(::std::sync::Arc::clone(&aggregator))
            .build(),
    );
    let list_playlist_videos_interactor = ::std::sync::Arc::new(
        ListPlaylistVideosInteractor::builder()
            .view(::std::sync::Arc::clone(&view) as ::std::sync::Arc<dyn ListPlaylistVideosOutputBoundary>)
            .session(::std::sync::Arc::clone(&session))
            .aggregator(::std::sync::Arc::clone(&aggregator))
            .build(),
    );

    ::tracing::info!(subcommand = ?matches.subcommand_name(), "Starting");

    let outcome = match matches.subcommand() {
        Some(("total", matches)) => {
            let request = CalculatePlaylistDurationRequestModel::builder()
                .url(matches.get_one::<::std::string::String>("url").ok()?.to_owned())
                .build();
            calculate_playlist_duration_interactor.accept(request).await
        },
        Some(("list", matches)) => {
            let request = ListPlaylistVideosRequestModel::builder()
                .url(matches.get_one::<::std::string::String>("url").ok()?.to_owned())
                .build();
            list_playlist_videos_interactor.accept(request).await
        },
        Some(("shell", _)) => {
            let shell = ::std::sync::Arc::new(
                Shell::builder()
                    .input(input)
                    .view(::std::sync::Arc::clone(&view))
                    .session(session)
                    .credentials(credentials)
                    .calculate_playlist_duration(calculate_playlist_duration_interactor)
                    .list_playlist_videos(list_playlist_videos_interactor)
                    .build(),
            );
            shell.run().await
        },

        _ => unreachable!(),
    };

    if let Err(err) = &outcome {
        ::tracing::error!(error = %err, "Exiting with an error");
    }

    outcome
}

fn command() -> ::clap::Command {
    let url = ::clap::Arg::new("url")
        .short('i')
        .long("input")
        .required(true)
        .help("Playlist URL, e.g. https://www.youtube.com/playlist?list=...")
        .value_parser(::clap::value_parser!(::std::string::String));

    ::clap::Command::new("playtime")
        .about("Total up how long a YouTube playlist takes to watch")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            ::clap::Command::new("total")
                .about("Print the total duration of a playlist")
                .arg(url.clone()),
        )
        .subcommand(
            ::clap::Command::new("list")
                .about("List every video of a playlist with its duration")
                .arg(url),
        )
        .subcommand(::clap::Command::new("shell").about("Fetch playlists and track watched videos interactively"))
        .arg(
            ::clap::Arg::new("api-key")
                .short('k')
                .long("api-key")
                .global(true)
                .help("YouTube Data API key; prompted for when absent")
                .value_parser(::clap::value_parser!(::std::string::String)),
        )
        .arg(
            ::clap::Arg::new("api-base-url")
                .long("api-base-url")
                .global(true)
                .default_value(DEFAULT_BASE_URL)
                .value_parser(::clap::value_parser!(::url::Url)),
        )
        .arg(
            ::clap::Arg::new("timeout")
                .long("timeout")
                .global(true)
                .default_value("30")
                .help("Request timeout in seconds")
                .value_parser(::clap::value_parser!(u64)),
        )
        .arg(
            ::clap::Arg::new("log-directory")
                .long("log-directory")
                .global(true)
                .default_value("logs")
                .value_parser(::clap::value_parser!(::std::path::PathBuf)),
        )
}

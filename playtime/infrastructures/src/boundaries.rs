use ::async_trait::async_trait;
use ::domain::durations::FormattedDuration;
use ::domain::VideoRecord;
use ::domain::Watchlist;
use ::use_cases::boundaries::Activate;
use ::use_cases::boundaries::Update;
use ::use_cases::models::events::PlaylistDurationCalculatedEvent;
use ::use_cases::models::events::PlaylistFetchEvent;
use ::use_cases::models::events::PlaylistFetchMode;
use ::use_cases::models::events::PlaylistFetchProgressUpdatedEvent;
use ::use_cases::models::events::PlaylistFetchStartedEvent;
use ::use_cases::models::events::PlaylistVideosListedEvent;
use ::use_cases::models::events::VideoSkippedEvent;

use crate::utils::aliases::Fallible;

macro_rules! lazy_progress_style {
    ($template:expr) => {
        ::once_cell::sync::Lazy::new(|| {
            ::indicatif::ProgressStyle::with_template($template)
                .unwrap_or_else(|_| ::indicatif::ProgressStyle::default_spinner())
        })
    };
}

/// Renders fetch progress on stderr and owns the most recently listed playlist.
pub struct TerminalView {
    progress_bar: ::indicatif::ProgressBar,
    watchlist: ::tokio::sync::Mutex<Watchlist>,
}

impl TerminalView {
    pub fn new() -> Self {
        let progress_bar = ::indicatif::ProgressBar::hidden();

        Self { progress_bar, watchlist: ::tokio::sync::Mutex::new(Watchlist::default()) }
    }

    /// Flips the watched flag of each 1-based position, then prints the remaining time.
    pub async fn toggle(&self, positions: &[usize]) -> Fallible<()> {
        use ::colored::Colorize as _;

        let mut watchlist = self.watchlist.lock().await;

        if watchlist.is_empty() {
            println!("{}", "No playlist has been listed yet.".yellow());
            return Ok(());
        }

        for position in positions {
            let toggled = position
                .checked_sub(1)
                .and_then(|index| watchlist.toggle(index).map(|watched| (index, watched)));

            match toggled {
                Some((index, watched)) => {
                    let video = &watchlist.videos()[index];
                    ::tracing::debug!(position, watched, "Toggled video");

                    println!("{}", colorize_row(*position, video));
                },
                None => println!("{}", format!("There is no video #{}", position).yellow()),
            }
        }

        println!("{}", format_remaining(watchlist.remaining()));

        Ok(())
    }

    pub async fn show(&self) -> Fallible<()> {
        use ::colored::Colorize as _;

        let watchlist = self.watchlist.lock().await;

        if watchlist.is_empty() {
            println!("{}", "No playlist has been listed yet.".yellow());
            return Ok(());
        }

        print_watchlist(&watchlist);

        Ok(())
    }

    pub async fn remaining(&self) -> Fallible<()> {
        let watchlist = self.watchlist.lock().await;

        println!("{}", format_remaining(watchlist.remaining()));

        Ok(())
    }

    pub fn report(&self, err: &::anyhow::Error) {
        use ::colored::Colorize as _;

        self.progress_bar
            .suspend(|| eprintln!("{}", format!("Error: {}", err).red().bold()));
    }
}

#[async_trait]
impl Activate for TerminalView {
    async fn activate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        static SPINNER_STYLE: ::once_cell::sync::Lazy<::indicatif::ProgressStyle> =
            lazy_progress_style!("{spinner} {msg}");

        self.progress_bar.reset();
        self.progress_bar.set_style(SPINNER_STYLE.clone());
        self.progress_bar.set_message("Connecting...");
        self.progress_bar.set_draw_target(::indicatif::ProgressDrawTarget::stderr());
        self.progress_bar.enable_steady_tick(::std::time::Duration::from_millis(100));

        Ok(())
    }

    async fn deactivate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        self.progress_bar.disable_steady_tick();
        self.progress_bar.finish_and_clear();
        self.progress_bar.set_draw_target(::indicatif::ProgressDrawTarget::hidden());

        Ok(())
    }
}

#[async_trait]
impl Update<PlaylistFetchEvent> for TerminalView {
    async fn update(self: ::std::sync::Arc<Self>, event: &PlaylistFetchEvent) -> Fallible<()> {
        match event {
            PlaylistFetchEvent::Started(event) => self.update(event).await,
            PlaylistFetchEvent::ProgressUpdated(event) => self.update(event).await,
        }
    }
}

#[async_trait]
impl Update<PlaylistFetchStartedEvent> for TerminalView {
    async fn update(self: ::std::sync::Arc<Self>, event: &PlaylistFetchStartedEvent) -> Fallible<()> {
        let PlaylistFetchStartedEvent { playlist_id, mode } = event;

        // A total leaves the listed playlist and its watched marks alone.
        if *mode == PlaylistFetchMode::List {
            *self.watchlist.lock().await = Watchlist::default();
        }

        self.progress_bar.set_message(format!("Fetching playlist {}", playlist_id));

        Ok(())
    }
}

#[async_trait]
impl Update<PlaylistFetchProgressUpdatedEvent> for TerminalView {
    async fn update(self: ::std::sync::Arc<Self>, event: &PlaylistFetchProgressUpdatedEvent) -> Fallible<()> {
        static PROGRESS_BAR_STYLE: ::once_cell::sync::Lazy<::indicatif::ProgressStyle> =
            lazy_progress_style!("{spinner} {bar:40} {msg}");

        let PlaylistFetchProgressUpdatedEvent { fetched_videos, total_videos, .. } = event;

        match total_videos {
            Some(total_videos) => {
                self.progress_bar.set_style(PROGRESS_BAR_STYLE.clone());
                self.progress_bar.set_length(*total_videos);
                self.progress_bar.set_position(*fetched_videos);
                self.progress_bar
                    .set_message(format!("{}/{} videos", fetched_videos, total_videos));
            },
            None => self.progress_bar.set_message(format!("{} videos", fetched_videos)),
        }

        Ok(())
    }
}

#[async_trait]
impl Update<VideoSkippedEvent> for TerminalView {
    async fn update(self: ::std::sync::Arc<Self>, event: &VideoSkippedEvent) -> Fallible<()> {
        use ::colored::Colorize as _;

        let VideoSkippedEvent { video_id, title, .. } = event;

        self.progress_bar
            .println(format!("Skipping unavailable video: {} ({})", title, video_id).yellow().to_string());

        Ok(())
    }
}

#[async_trait]
impl Update<PlaylistDurationCalculatedEvent> for TerminalView {
    async fn update(self: ::std::sync::Arc<Self>, event: &PlaylistDurationCalculatedEvent) -> Fallible<()> {
        use ::colored::Colorize as _;

        let PlaylistDurationCalculatedEvent { total_seconds, .. } = event;

        let total = FormattedDuration(*total_seconds).to_string();

        self.progress_bar
            .suspend(|| println!("Total duration: {}", total.white().bold()));

        Ok(())
    }
}

#[async_trait]
impl Update<PlaylistVideosListedEvent> for TerminalView {
    async fn update(self: ::std::sync::Arc<Self>, event: &PlaylistVideosListedEvent) -> Fallible<()> {
        let PlaylistVideosListedEvent { watchlist, .. } = event;

        let mut current = self.watchlist.lock().await;
        *current = watchlist.clone();

        self.progress_bar.suspend(|| print_watchlist(&current));

        Ok(())
    }
}

fn print_watchlist(watchlist: &Watchlist) {
    for (index, video) in watchlist.videos().iter().enumerate() {
        println!("{}", colorize_row(index + 1, video));
    }

    println!("{}", format_remaining(watchlist.remaining()));
}

fn colorize_row(position: usize, video: &VideoRecord) -> ::colored::ColoredString {
    use ::colored::Colorize as _;

    let row = format_row(position, video);

    if video.watched {
        row.dimmed()
    } else {
        row.normal()
    }
}

fn format_row(position: usize, video: &VideoRecord) -> String {
    let mark = if video.watched { 'x' } else { ' ' };

    format!("{:>3}. [{}] {} ({})", position, mark, video.title, FormattedDuration(video.duration_seconds))
}

fn format_remaining(seconds: u64) -> String {
    format!("Remaining time: {}", FormattedDuration(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &'static str, duration_seconds: u64) -> VideoRecord {
        VideoRecord::builder().title(title).duration_seconds(duration_seconds).build()
    }

    #[test]
    fn rows_show_position_mark_and_duration() {
        let mut watched = video("Basics", 200);
        watched.watched = true;

        assert_eq!(format_row(1, &video("Intro", 100)), "  1. [ ] Intro (00:01:40)");
        assert_eq!(format_row(12, &watched), " 12. [x] Basics (00:03:20)");
    }

    #[test]
    fn remaining_time_is_formatted() {
        assert_eq!(format_remaining(300), "Remaining time: 00:05:00");
    }

    #[tokio::test]
    async fn a_started_fetch_clears_the_listed_playlist() {
        let view = ::std::sync::Arc::new(TerminalView::new());

        let listed = PlaylistVideosListedEvent {
            playlist_id: "PL123".into(),
            watchlist: Watchlist::from(vec![video("Intro", 100), video("Basics", 200)]),
        };

        Update::<PlaylistVideosListedEvent>::update(::std::sync::Arc::clone(&view), &listed).await.unwrap();
        assert_eq!(view.watchlist.lock().await.len(), 2);

        view.toggle(&[1]).await.unwrap();
        assert_eq!(view.watchlist.lock().await.remaining(), 200);

        let started = PlaylistFetchEvent::Started(PlaylistFetchStartedEvent {
            playlist_id: "PL456".into(),
            mode: PlaylistFetchMode::List,
        });

        Update::<PlaylistFetchEvent>::update(::std::sync::Arc::clone(&view), &started).await.unwrap();
        assert!(view.watchlist.lock().await.is_empty());
    }

    #[tokio::test]
    async fn totalling_another_playlist_keeps_the_listed_one() {
        let view = ::std::sync::Arc::new(TerminalView::new());

        let listed = PlaylistVideosListedEvent {
            playlist_id: "PL123".into(),
            watchlist: Watchlist::from(vec![video("Intro", 100), video("Basics", 200)]),
        };

        Update::<PlaylistVideosListedEvent>::update(::std::sync::Arc::clone(&view), &listed).await.unwrap();
        view.toggle(&[2]).await.unwrap();

        let started = PlaylistFetchEvent::Started(PlaylistFetchStartedEvent {
            playlist_id: "PL456".into(),
            mode: PlaylistFetchMode::Sum,
        });

        Update::<PlaylistFetchEvent>::update(::std::sync::Arc::clone(&view), &started).await.unwrap();

        let watchlist = view.watchlist.lock().await;
        assert_eq!(watchlist.len(), 2);
        assert_eq!(watchlist.remaining(), 100);
    }

    #[tokio::test]
    async fn out_of_range_positions_are_ignored() {
        let view = ::std::sync::Arc::new(TerminalView::new());

        let listed = PlaylistVideosListedEvent {
            playlist_id: "PL123".into(),
            watchlist: Watchlist::from(vec![video("Intro", 100)]),
        };

        Update::<PlaylistVideosListedEvent>::update(::std::sync::Arc::clone(&view), &listed).await.unwrap();

        view.toggle(&[0, 2]).await.unwrap();

        assert_eq!(view.watchlist.lock().await.remaining(), 100);
    }
}

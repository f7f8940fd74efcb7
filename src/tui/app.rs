use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, error, info};

use crate::backend::Backend;
use crate::config::Config;
use crate::content::ConfirmationContent;
use crate::model::SubmissionRecord;

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    ConfirmationState, HelpState, RegistrationState, draw_confirmation, draw_help,
    draw_registration,
};
use super::widgets::{StatusBarContext, draw_status_bar};

/// How long the loop waits for input before checking on a pending submission.
const TICK: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The registration form.
    Registration,
    /// The dialog shown after a submission settles, drawn over the form.
    Confirmation,
    /// Show keybinding help.
    Help,
}

/// Presentation settings taken from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub backend_origin: String,
    pub report_failures: bool,
    pub content: ConfirmationContent,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            backend_origin: config.backend_origin.clone(),
            report_failures: config.report_failures,
            content: ConfirmationContent::default(),
        }
    }
}

/// Submission counts for the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub delivered: usize,
    pub failed: usize,
}

/// Top-level application state.
pub struct App<B> {
    screen: Screen,
    registration: RegistrationState,
    confirmation: Option<ConfirmationState>,
    help: HelpState,
    backend: B,
    runtime: Handle,
    pending: Option<oneshot::Receiver<bool>>,
    settings: AppSettings,
    stats: SessionStats,
    main_area: Rect,
    should_quit: bool,
}

impl<B: Backend + Clone + 'static> App<B> {
    /// Creates a new `App` on an empty [`Screen::Registration`] form.
    ///
    /// Submissions run on `runtime` so the event loop never blocks on the network.
    pub fn new(backend: B, runtime: Handle, settings: AppSettings) -> Self {
        Self {
            screen: Screen::Registration,
            registration: RegistrationState::new(),
            confirmation: None,
            help: HelpState::new(),
            backend,
            runtime,
            pending: None,
            settings,
            stats: SessionStats::default(),
            main_area: Rect::default(),
            should_quit: false,
        }
    }

    /// Main event loop: draw → poll input → dispatch → collect submission result.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<T: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<T>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
            self.poll_submission();
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&mut self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        self.main_area = main_area;

        match self.screen {
            Screen::Registration => draw_registration(&self.registration, frame, main_area),
            Screen::Confirmation => {
                draw_registration(&self.registration, frame, main_area);
                if let Some(confirmation) = &self.confirmation {
                    draw_confirmation(confirmation, frame, main_area);
                }
            }
            Screen::Help => draw_help(&self.help, frame, main_area),
        }

        draw_status_bar(&self.status_context(), frame, status_area);
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::F(1) && self.screen != Screen::Help {
            self.help.set_origin(self.screen);
            self.help.reset();
            self.screen = Screen::Help;
            return;
        }

        let action = match self.screen {
            Screen::Registration => self.registration.handle_key(key),
            Screen::Confirmation => match self.confirmation.as_mut() {
                Some(confirmation) => confirmation.handle_key(key),
                None => Action::Dismiss,
            },
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    /// Routes mouse input to the confirmation dialog; other screens ignore it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Confirmation {
            return;
        }
        if let Some(confirmation) = self.confirmation.as_mut() {
            let action = confirmation.handle_mouse(mouse, self.main_area);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => {
                // Returning to a dialog that has since closed lands on the form.
                self.screen = if screen == Screen::Confirmation && self.confirmation.is_none() {
                    Screen::Registration
                } else {
                    screen
                };
            }
            Action::Submit(record) => self.start_submission(record),
            Action::Dismiss => {
                debug!("confirmation dismissed");
                self.confirmation = None;
                self.screen = Screen::Registration;
            }
        }
    }

    fn start_submission(&mut self, record: SubmissionRecord) {
        let (tx, rx) = oneshot::channel();
        let backend = self.backend.clone();
        self.runtime.spawn(async move {
            let delivered = backend.submit(record).await;
            // The receiver is gone only if the app already quit.
            let _ = tx.send(delivered);
        });
        self.pending = Some(rx);
    }

    /// Collects the result of the in-flight submission, if it has arrived,
    /// and opens the confirmation dialog.
    pub fn poll_submission(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        let delivered = match rx.try_recv() {
            Ok(delivered) => delivered,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => {
                error!("submission task ended without reporting a result");
                false
            }
        };
        self.pending = None;

        let Some(receipt) = self.registration.finish_submit(delivered) else {
            return;
        };
        if delivered {
            self.stats.delivered += 1;
        } else {
            self.stats.failed += 1;
        }
        info!(
            delivered,
            session_delivered = self.stats.delivered,
            session_failed = self.stats.failed,
            "showing confirmation"
        );
        self.confirmation = Some(ConfirmationState::new(
            receipt,
            self.settings.content.clone(),
            self.settings.report_failures,
        ));
        // Help stays open and returns to the dialog once closed.
        if self.screen == Screen::Help {
            self.help.set_origin(Screen::Confirmation);
        } else {
            self.screen = Screen::Confirmation;
        }
    }

    fn status_context(&self) -> StatusBarContext {
        StatusBarContext {
            backend_origin: self.settings.backend_origin.clone(),
            delivered: self.stats.delivered,
            failed: self.stats.failed,
            busy: self.registration.is_busy(),
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn registration(&self) -> &RegistrationState {
        &self.registration
    }

    pub fn confirmation(&self) -> Option<&ConfirmationState> {
        self.confirmation.as_ref()
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use crossterm::event::{KeyEventState, MouseButton, MouseEventKind};
    use tokio::runtime::Runtime;

    use super::*;
    use crate::model::{
        DesiredPosition, DesiredYear, Faculty, FieldUpdate, Gender, Interest,
    };

    /// Records submissions and answers with a fixed outcome.
    #[derive(Clone, Default)]
    struct FakeBackend {
        calls: Arc<Mutex<Vec<SubmissionRecord>>>,
        fail: bool,
    }

    impl FakeBackend {
        fn calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Backend for FakeBackend {
        async fn submit(&self, record: SubmissionRecord) -> bool {
            self.calls.lock().unwrap().push(record);
            !self.fail
        }
    }

    fn settings(report_failures: bool) -> AppSettings {
        AppSettings {
            backend_origin: "http://localhost:5001".into(),
            report_failures,
            content: ConfirmationContent::default(),
        }
    }

    fn make_app(backend: FakeBackend, report_failures: bool) -> (Runtime, App<FakeBackend>) {
        let runtime = Runtime::new().unwrap();
        let app = App::new(backend, runtime.handle().clone(), settings(report_failures));
        (runtime, app)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    fn fill_valid(app: &mut App<FakeBackend>) {
        let controller = app.registration.controller_mut();
        controller.set_field(FieldUpdate::FirstName("Somchai".into()));
        controller.set_field(FieldUpdate::LastName("Srisuk".into()));
        controller.set_field(FieldUpdate::Gender(Some(Gender::Male)));
        controller.set_field(FieldUpdate::Faculty(Some(Faculty::Graduated)));
        controller.set_field(FieldUpdate::DesiredPosition(Some(
            DesiredPosition::SoftwareEngineerAi,
        )));
        controller.set_field(FieldUpdate::DesiredYear(Some(DesiredYear::Y2026)));
        controller.set_field(FieldUpdate::Email("somchai@example.com".into()));
        controller.set_field(FieldUpdate::EmailConfirm("somchai@example.com".into()));
        controller.toggle_interest(Interest::FullTimeInJapan);
        controller.set_privacy_consent(true);
    }

    /// Polls until the in-flight submission has been collected.
    fn settle(app: &mut App<FakeBackend>) {
        for _ in 0..400 {
            app.poll_submission();
            if !app.is_submitting() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("submission never settled");
    }

    mod keys {
        use super::*;

        #[test]
        fn new_starts_on_registration() {
            let (_rt, app) = make_app(FakeBackend::default(), false);
            assert_eq!(app.screen(), Screen::Registration);
            assert!(!app.should_quit());
            assert!(!app.is_submitting());
            assert_eq!(app.stats(), SessionStats::default());
        }

        #[test]
        fn ctrl_c_quits() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert!(app.should_quit());
        }

        #[test]
        fn plain_q_is_typed_not_quit() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            app.handle_key(press(KeyCode::Char('q')));
            assert!(!app.should_quit());
            assert_eq!(app.registration().controller().draft().first_name, "q");
        }

        #[test]
        fn release_events_are_ignored() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            app.handle_key(release(KeyCode::Char('a')));
            assert_eq!(app.registration().controller().draft().first_name, "");
        }

        #[test]
        fn f1_opens_help_and_esc_returns() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::Registration);
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn invalid_form_never_submits() {
            let backend = FakeBackend::default();
            let (_rt, mut app) = make_app(backend.clone(), false);
            app.handle_key(press(KeyCode::Enter));
            assert!(!app.is_submitting());
            assert_eq!(backend.calls(), 0);
            assert!(!app.registration().controller().errors().is_empty());
        }

        #[test]
        fn successful_submit_shows_confirmation() {
            let backend = FakeBackend::default();
            let (_rt, mut app) = make_app(backend.clone(), false);
            fill_valid(&mut app);
            app.handle_key(press(KeyCode::Enter));
            assert!(app.is_submitting());
            assert!(app.registration().is_busy());

            settle(&mut app);
            assert_eq!(backend.calls(), 1);
            assert_eq!(app.screen(), Screen::Confirmation);
            assert_eq!(app.stats(), SessionStats { delivered: 1, failed: 0 });
            let confirmation = app.confirmation().unwrap();
            assert_eq!(confirmation.receipt().full_name, "Somchai Srisuk");
            assert_eq!(confirmation.receipt().email, "somchai@example.com");
            assert!(!confirmation.shows_failure());
            assert_eq!(app.registration().controller().draft().first_name, "");
        }

        #[test]
        fn failure_still_confirms_by_default() {
            let backend = FakeBackend {
                fail: true,
                ..FakeBackend::default()
            };
            let (_rt, mut app) = make_app(backend, false);
            fill_valid(&mut app);
            app.handle_key(press(KeyCode::Enter));
            settle(&mut app);
            assert_eq!(app.screen(), Screen::Confirmation);
            assert_eq!(app.stats(), SessionStats { delivered: 0, failed: 1 });
            assert!(!app.confirmation().unwrap().shows_failure());
        }

        #[test]
        fn failure_reported_when_configured() {
            let backend = FakeBackend {
                fail: true,
                ..FakeBackend::default()
            };
            let (_rt, mut app) = make_app(backend, true);
            fill_valid(&mut app);
            app.handle_key(press(KeyCode::Enter));
            settle(&mut app);
            assert!(app.confirmation().unwrap().shows_failure());
        }

        #[test]
        fn repeated_enter_submits_once() {
            let backend = FakeBackend::default();
            let (_rt, mut app) = make_app(backend.clone(), false);
            fill_valid(&mut app);
            app.handle_key(press(KeyCode::Enter));
            app.handle_key(press(KeyCode::Enter));
            app.handle_key(press(KeyCode::Enter));
            settle(&mut app);
            assert_eq!(backend.calls(), 1);
        }

        #[test]
        fn dismiss_returns_to_fresh_form() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            fill_valid(&mut app);
            app.handle_key(press(KeyCode::Enter));
            settle(&mut app);
            app.handle_key(press(KeyCode::Enter));
            assert_eq!(app.screen(), Screen::Registration);
            assert!(app.confirmation().is_none());
            assert!(!app.registration().is_busy());
            assert!(app.registration().controller().errors().is_empty());
        }

        #[test]
        fn click_outside_dialog_dismisses() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            app.main_area = Rect::new(0, 0, 100, 40);
            fill_valid(&mut app);
            app.handle_key(press(KeyCode::Enter));
            settle(&mut app);
            app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            });
            assert_eq!(app.screen(), Screen::Registration);
        }

        #[test]
        fn mouse_ignored_on_form() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            });
            assert_eq!(app.screen(), Screen::Registration);
        }

        #[test]
        fn help_during_confirmation_returns_to_it() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            fill_valid(&mut app);
            app.handle_key(press(KeyCode::Enter));
            settle(&mut app);
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::Confirmation);
        }

        #[test]
        fn result_arriving_during_help_waits_for_help_to_close() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            fill_valid(&mut app);
            app.handle_key(press(KeyCode::Enter));
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);

            settle(&mut app);
            assert_eq!(app.screen(), Screen::Help);
            assert_eq!(app.help.origin(), Screen::Confirmation);
            assert!(app.confirmation().is_some());

            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::Confirmation);
        }

        #[test]
        fn poll_without_pending_is_noop() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            app.poll_submission();
            assert_eq!(app.screen(), Screen::Registration);
            assert_eq!(app.stats(), SessionStats::default());
        }

        #[test]
        fn status_context_reflects_session() {
            let (_rt, mut app) = make_app(FakeBackend::default(), false);
            fill_valid(&mut app);
            app.handle_key(press(KeyCode::Enter));
            assert!(app.status_context().busy);
            settle(&mut app);
            let ctx = app.status_context();
            assert!(!ctx.busy);
            assert_eq!(ctx.delivered, 1);
            assert_eq!(ctx.backend_origin, "http://localhost:5001");
        }
    }

    #[test]
    fn settings_from_config() {
        let config = Config {
            report_failures: true,
            ..Config::default()
        };
        let settings = AppSettings::from_config(&config);
        assert!(settings.report_failures);
        assert_eq!(settings.backend_origin, config.backend_origin);
        assert_eq!(settings.content, ConfirmationContent::default());
    }
}

use eframe::{self, egui};
use egui::ViewportBuilder;

use crate::api::MemeApi;
use crate::session::Session;

use super::screens::{CreateScreen, CreateState, FeedScreen, FeedState, LoginScreen, LoginState};
use super::state::{AppState, Screen};

pub struct MemeApp {
    app_state: AppState,
    session: Session,
    /// Present while a session token exists; rebuilt when it changes.
    api: Option<MemeApi>,
    login_state: LoginState,
    feed_state: FeedState,
    create_state: CreateState,
}

impl MemeApp {
    pub fn new() -> Self {
        let session = Session::load();
        let mut app_state = AppState::default();
        if !session.is_authenticated() {
            app_state.current_screen = Screen::Login;
        }
        Self {
            app_state,
            session,
            api: None,
            login_state: LoginState::default(),
            feed_state: FeedState::default(),
            create_state: CreateState::default(),
        }
    }

    /// Keeps the API client in step with the session. Logging out drops
    /// the client and all cached screen state; a new token starts fresh.
    fn sync_api(&mut self) {
        match self.session.token() {
            None => {
                if self.api.take().is_some() {
                    self.feed_state = FeedState::default();
                    self.create_state = CreateState::default();
                }
            }
            Some(token) => {
                let changed = self.api.as_ref().map(|a| a.token != token).unwrap_or(true);
                if changed {
                    self.api = Some(MemeApi::new(token.to_string()));
                    self.feed_state = FeedState::default();
                }
            }
        }
    }
}

impl Default for MemeApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for MemeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_api();
        if !self.session.is_authenticated() {
            self.app_state.current_screen = Screen::Login;
        }

        match self.app_state.current_screen {
            Screen::Login => LoginScreen::show(
                ctx,
                &mut self.app_state,
                &mut self.session,
                &mut self.login_state,
            ),
            Screen::Feed => {
                if let Some(api) = &self.api {
                    FeedScreen::show(
                        ctx,
                        &mut self.app_state,
                        &mut self.session,
                        api,
                        &mut self.feed_state,
                    );
                }
            }
            Screen::Create => {
                if let Some(api) = &self.api {
                    CreateScreen::show(
                        ctx,
                        &mut self.app_state,
                        &mut self.session,
                        api,
                        &mut self.create_state,
                    );
                }
            }
        }
    }
}

pub fn launch_gui() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([540.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Meme Feed",
        options,
        Box::new(|_cc| Ok(Box::new(MemeApp::new()))),
    )
}

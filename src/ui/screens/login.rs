//! Login gate: paste an API token to open a session.

use eframe::egui;

use crate::session::Session;
use crate::ui::state::AppState;

#[derive(Default)]
pub struct LoginState {
    pub token_input: String,
}

pub struct LoginScreen;

impl LoginScreen {
    pub fn show(
        ctx: &egui::Context,
        app_state: &mut AppState,
        session: &mut Session,
        state: &mut LoginState,
    ) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.heading("Meme Feed");
                ui.add_space(10.0);
                ui.label("Paste your API token to sign in.");
                ui.add_space(20.0);

                ui.add(
                    egui::TextEdit::singleline(&mut state.token_input)
                        .password(true)
                        .desired_width(300.0)
                        .hint_text("API token"),
                );

                ui.add_space(10.0);
                let can_submit = !state.token_input.trim().is_empty();
                if ui
                    .add_enabled(can_submit, egui::Button::new("Sign in"))
                    .clicked()
                {
                    let token = state.token_input.trim().to_string();
                    state.token_input.clear();
                    session.set_token(token);
                    log::info!("Signed in, returning to previous screen");
                    app_state.current_screen = app_state.login_redirect;
                }
            });
        });
    }
}

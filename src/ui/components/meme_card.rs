//! Renders one feed entry: author line, picture with caption overlays,
//! description, comments toggle and the expanded comment thread.
//!
//! The card does not talk to the network. It emits [`MemeAction`]s and
//! the feed screen turns them into background fetches, which keeps the
//! card logic plain and testable.

use chrono::{DateTime, Utc};
use eframe::egui;

use crate::cache::{PaginatedQuery, UserCache};
use crate::formatters::format_time_ago;
use crate::models::{Comment, Meme, User};

use super::comment_card;
use super::meme_picture::MemePicture;

/// Per-meme UI state: the expand/collapse flag, the paginated comment
/// query and the composer input.
#[derive(Default)]
pub struct CommentThread {
    pub expanded: bool,
    pub comments: PaginatedQuery<Comment>,
    pub composer: String,
    pub posting: bool,
}

/// What the user did on a card this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum MemeAction {
    ToggleComments,
    /// Pointer is over the comments toggle; pre-warm the comment query.
    HoverComments,
    LoadMoreComments,
    SubmitComment(String),
}

pub fn show(
    ui: &mut egui::Ui,
    meme: &Meme,
    author: Option<&User>,
    current_user: Option<&User>,
    texture: Option<&egui::TextureHandle>,
    thread: &mut CommentThread,
    users: &UserCache,
    now: DateTime<Utc>,
) -> Vec<MemeAction> {
    let mut actions = Vec::new();

    // Author line
    ui.horizontal(|ui| {
        match author {
            Some(user) => ui.strong(&user.username),
            None => ui.weak("..."),
        };
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format_time_ago(meme.created_at, now));
        });
    });

    MemePicture::new(texture, &meme.texts).show(ui);

    ui.strong("Description:");
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(&meme.description);
    });

    // Comments toggle. The count is whatever the server last reported;
    // posting a comment does not bump it locally.
    ui.horizontal(|ui| {
        let arrow = if thread.expanded { "⏶" } else { "⏷" };
        let toggle = ui.link(format!("{} comments {arrow}", meme.comments_count));
        if toggle.clicked() {
            actions.push(MemeAction::ToggleComments);
        }
        if toggle.hovered() {
            actions.push(MemeAction::HoverComments);
        }
    });
    ui.separator();

    if thread.expanded {
        show_comment_section(ui, thread, current_user, users, now, &mut actions);
    }

    actions
}

fn show_comment_section(
    ui: &mut egui::Ui,
    thread: &mut CommentThread,
    current_user: Option<&User>,
    users: &UserCache,
    now: DateTime<Utc>,
    actions: &mut Vec<MemeAction>,
) {
    // Composer
    ui.horizontal(|ui| {
        if let Some(user) = current_user {
            ui.weak(&user.username);
        }
        let response = ui.add_enabled(
            !thread.posting,
            egui::TextEdit::singleline(&mut thread.composer)
                .desired_width(f32::INFINITY)
                .hint_text("Type your comment here..."),
        );
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        // Empty submissions never leave the card.
        if submitted && !thread.composer.trim().is_empty() {
            actions.push(MemeAction::SubmitComment(thread.composer.clone()));
        }
    });

    for comment in thread.comments.items() {
        comment_card::show(ui, comment, users.get(&comment.author_id), now);
    }

    if thread.comments.is_fetching() {
        ui.spinner();
    } else if thread.comments.has_next() {
        if ui.small_button("Load more comments").clicked() {
            actions.push(MemeAction::LoadMoreComments);
        }
    }
}

use super::*;

#[test]
fn cannot_submit_without_picture() {
    let mut state = CreateState::default();
    state.description = "funny".to_string();
    assert!(state.picture.is_none());
    assert!(!state.can_submit());
}

#[test]
fn cannot_submit_with_blank_description() {
    let mut state = CreateState::default();
    state.description = "   ".to_string();
    assert!(!state.can_submit());
}

#[test]
fn cannot_submit_while_a_submission_is_pending() {
    let mut state = CreateState::default();
    state.description = "funny".to_string();
    state.pending = true;
    assert!(!state.can_submit());
}

#[test]
fn new_captions_are_numbered_and_on_the_canvas() {
    let mut state = CreateState::default();
    state.add_caption();
    state.add_caption();

    let contents: Vec<&str> = state.captions.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["New caption 1", "New caption 2"]);
    for caption in &state.captions {
        assert!((0..400).contains(&caption.x));
        assert!((0..225).contains(&caption.y));
    }
}

#[test]
fn deleting_a_caption_keeps_the_order_of_the_rest() {
    let mut state = CreateState::default();
    for content in ["first", "second", "third"] {
        state.captions.push(CaptionText {
            content: content.to_string(),
            x: 0,
            y: 0,
        });
    }

    state.captions.remove(1);

    let contents: Vec<&str> = state.captions.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "third"]);
}

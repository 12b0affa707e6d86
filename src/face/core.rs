use crate::element::{ElementId, ViewState};

/// Canonical face names, tried first as exact case-insensitive matches in
/// this priority order.
pub const FACE_CANDIDATES: &[&str] = &["face", "status", "mood", "emoji", "expression"];

/// Substring keywords tried after the canonical names.
pub const FACE_KEYWORDS: &[&str] = &["face", "status", "mood", "emoji", "expression", "smile"];

/// How the face element was selected; reported so the caller can log the
/// confidence of the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceMatch {
    /// Exact case-insensitive match against [`FACE_CANDIDATES`].
    Exact,
    /// Element name contains one of [`FACE_KEYWORDS`].
    Keyword,
    /// Drawable element that also carries a text/value payload.
    DrawableWithValue,
    /// Any drawable element at all. Can pick a semantically wrong element
    /// (a separator line, a header bitmap) when nothing face-like exists;
    /// kept as documented behavior so a face-less layout still gets a pet.
    DrawableFallback,
}

/// Select the one element that becomes the pet. Ties within a tier are broken
/// by registration order, so the result is stable for a given layout.
pub fn find_face(view: &ViewState) -> Option<(ElementId, FaceMatch)> {
    for candidate in FACE_CANDIDATES {
        for name in view.names() {
            if name.eq_ignore_ascii_case(candidate) {
                return Some((name.to_string(), FaceMatch::Exact));
            }
        }
    }

    for name in view.names() {
        let lowered = name.to_ascii_lowercase();
        if FACE_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
            return Some((name.to_string(), FaceMatch::Keyword));
        }
    }

    for (name, element) in view.iter() {
        if element.drawable() && element.has_value() {
            return Some((name.to_string(), FaceMatch::DrawableWithValue));
        }
    }

    for (name, element) in view.iter() {
        if element.drawable() {
            return Some((name.to_string(), FaceMatch::DrawableFallback));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::UiElement;
    use crate::element::widgets::{Bitmap, LabeledValue, Line, Text};
    use crate::geometry::Size;

    /// Element with no capabilities at all, for the nothing-found tier.
    struct Inert;

    impl UiElement for Inert {}

    fn empty_view() -> ViewState {
        ViewState::new(Size::new(250, 122))
    }

    #[test]
    fn exact_match_beats_registration_order() {
        let mut view = empty_view();
        view.register("battery", LabeledValue::new((5, 5), "BAT", "98%"));
        view.register("temp", LabeledValue::new((60, 5), "TEMP", "41C"));
        view.register("mood", Text::new((120, 40), "(^_^)"));

        let (name, matched) = find_face(&view).unwrap();
        assert_eq!(name, "mood");
        assert_eq!(matched, FaceMatch::Exact);
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let mut view = empty_view();
        view.register("FACE", Text::new((0, 0), "(o_o)"));

        let (name, matched) = find_face(&view).unwrap();
        assert_eq!(name, "FACE");
        assert_eq!(matched, FaceMatch::Exact);
    }

    #[test]
    fn candidate_priority_outranks_registration_order() {
        let mut view = empty_view();
        view.register("mood", Text::new((0, 0), ":|"));
        view.register("face", Text::new((0, 0), ":)"));

        // "face" is earlier in the candidate list even though "mood" was
        // registered first.
        let (name, _) = find_face(&view).unwrap();
        assert_eq!(name, "face");
    }

    #[test]
    fn keyword_substring_matches_first_in_order() {
        let mut view = empty_view();
        view.register("battery", LabeledValue::new((5, 5), "BAT", "98%"));
        view.register("big_smile", Text::new((0, 0), ":D"));
        view.register("smiley_two", Text::new((0, 0), ":D"));

        let (name, matched) = find_face(&view).unwrap();
        assert_eq!(name, "big_smile");
        assert_eq!(matched, FaceMatch::Keyword);
    }

    #[test]
    fn drawable_with_value_tier() {
        let mut view = empty_view();
        view.register("divider", Line::new((0, 12), (250, 12)));
        view.register("logo", Bitmap::new((0, 0), "logo.png"));
        view.register("uptime", Text::new((10, 10), "1h02m"));

        let (name, matched) = find_face(&view).unwrap();
        assert_eq!(name, "uptime");
        assert_eq!(matched, FaceMatch::DrawableWithValue);
    }

    #[test]
    fn drawable_fallback_tier() {
        let mut view = empty_view();
        view.register("divider", Line::new((0, 12), (250, 12)));
        view.register("logo", Bitmap::new((0, 0), "logo.png"));

        let (name, matched) = find_face(&view).unwrap();
        assert_eq!(name, "divider");
        assert_eq!(matched, FaceMatch::DrawableFallback);
    }

    #[test]
    fn no_candidate_at_all() {
        let mut view = empty_view();
        view.register("ghost", Inert);

        assert!(find_face(&view).is_none());
    }
}

use livetrans_core::{CoordinatorView, CycleMode};

/// Lines to print for the transition from `previous` to `view`.
///
/// Each region (status line, error banner, result) is printed only when it
/// changed, so a steady stream of renders does not repeat the last result.
pub fn render(previous: Option<&CoordinatorView>, view: &CoordinatorView) -> Vec<String> {
    let mut lines = Vec::new();

    let status_changed = previous.map_or(true, |prev| {
        prev.enabled != view.enabled
            || prev.target_lang != view.target_lang
            || prev.status != view.status
            || prev.in_flight != view.in_flight
    });
    if status_changed {
        lines.push(status_line(view));
    }

    if let Some(banner) = &view.error_banner {
        if previous.map_or(true, |prev| prev.error_banner.as_ref() != Some(banner)) {
            lines.push(format!("error: {banner}"));
        }
    }

    if let Some(result) = &view.result {
        if previous.map_or(true, |prev| prev.result.as_ref() != Some(result)) {
            lines.push(format!(
                "  {} ({})",
                result.original_text, result.detected_language
            ));
            lines.push(format!(
                "  => {} ({})",
                result.translated_text, result.target_language
            ));
            if let Some(history_id) = result.history_id {
                lines.push(format!("  saved as history #{history_id}"));
            }
        }
    }

    lines
}

fn status_line(view: &CoordinatorView) -> String {
    let mode = if view.enabled { "on" } else { "off" };
    let mut line = format!("[realtime {mode} -> {}]", view.target_lang);
    if let Some(status) = &view.status {
        line.push(' ');
        if status.is_error {
            line.push_str("! ");
        }
        line.push_str(status.message);
    }
    if view.in_flight == Some(CycleMode::Manual) {
        line.push_str(" (translating...)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use livetrans_core::{StatusKind, Translation};
    use pretty_assertions::assert_eq;

    fn view() -> CoordinatorView {
        CoordinatorView {
            enabled: true,
            target_lang: "English".to_string(),
            ..CoordinatorView::default()
        }
    }

    fn hola() -> Translation {
        Translation {
            original_text: "Hola".to_string(),
            detected_language: "Spanish".to_string(),
            translated_text: "Hello".to_string(),
            target_language: "English".to_string(),
            history_id: Some(3),
        }
    }

    #[test]
    fn first_render_shows_the_status_line() {
        assert_eq!(render(None, &view()), vec!["[realtime on -> English]".to_string()]);
    }

    #[test]
    fn error_status_is_flagged() {
        let current = CoordinatorView {
            status: Some(StatusKind::RateLimited.into()),
            ..view()
        };
        assert_eq!(
            render(Some(&view()), &current),
            vec!["[realtime on -> English] ! Rate limit exceeded".to_string()]
        );
    }

    #[test]
    fn result_is_printed_once() {
        let before = CoordinatorView {
            status: Some(StatusKind::Translating.into()),
            ..view()
        };
        let after = CoordinatorView {
            status: Some(StatusKind::Translated.into()),
            result: Some(hola()),
            ..view()
        };

        assert_eq!(
            render(Some(&before), &after),
            vec![
                "[realtime on -> English] Translated!".to_string(),
                "  Hola (Spanish)".to_string(),
                "  => Hello (English)".to_string(),
                "  saved as history #3".to_string(),
            ]
        );

        let cleared = CoordinatorView {
            status: None,
            ..after.clone()
        };
        assert_eq!(
            render(Some(&after), &cleared),
            vec!["[realtime on -> English]".to_string()]
        );
    }

    #[test]
    fn manual_cycle_and_banner() {
        let loading = CoordinatorView {
            enabled: false,
            in_flight: Some(CycleMode::Manual),
            ..view()
        };
        assert_eq!(
            render(None, &loading),
            vec!["[realtime off -> English] (translating...)".to_string()]
        );

        let failed = CoordinatorView {
            enabled: false,
            error_banner: Some("Translation failed".to_string()),
            ..view()
        };
        assert_eq!(
            render(Some(&loading), &failed),
            vec![
                "[realtime off -> English]".to_string(),
                "error: Translation failed".to_string(),
            ]
        );
    }
}

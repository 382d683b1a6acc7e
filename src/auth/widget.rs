use super::{AuthForm, Control, Field, FormKind};
use crate::theme::{
    form::{INPUT_STYLE, LINK_STYLE, PLACEHOLDER_STYLE},
    BASE_STYLE, BUTTON_STYLE, ERROR_STYLE, FOCUS_STYLE, MUTED_STYLE, TITLE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{HorizontalAlignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const MODAL_WIDTH: u16 = 56;

/// Columns taken by a field's label before its input
const LABEL_WIDTH: u16 = 18;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Row {
    Blank,
    Input(Field),
    Error(Field),
    RememberMe,
    Failure,
    Submit,
    Switch,
}

fn rows(kind: FormKind) -> Vec<Row> {
    let mut rows = vec![Row::Blank];
    for field in kind.fields() {
        rows.push(Row::Input(field));
        rows.push(Row::Error(field));
    }
    if kind == FormKind::Login {
        rows.push(Row::RememberMe);
    }
    rows.extend([Row::Failure, Row::Submit, Row::Switch]);
    rows
}

/// Centered modal dialog showing a sign-in or create-account form
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct AuthModal;

impl StatefulWidget for AuthModal {
    type State = AuthForm;

    /*
     * ┌────────────────────── Sign In ───────────────────────┐
     * │                                                      │
     * │ Email Address     Enter your email                   │
     * │                   Email is required                  │
     * │ Password          ••••••••                           │
     * │                                                      │
     * │ [ ] Remember me                                      │
     * │                                                      │
     * │                     [ Sign In ]                      │
     * │ Don't have an account? Create account                │
     * └──────────────────────────────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer, form: &mut AuthForm) {
        form.hits.clear();
        form.boundary.clear();
        let kind = form.kind();
        let rows = rows(kind);
        let height = u16::try_from(rows.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = MODAL_WIDTH.min(area.width);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        Clear.render(popup, buf);
        let block = Block::bordered()
            .title(format!(" {} ", kind.title()))
            .title_alignment(HorizontalAlignment::Center)
            .title_style(TITLE_STYLE)
            .style(BASE_STYLE);
        let inner = block.inner(popup);
        block.render(popup, buf);
        form.boundary.register(popup);
        let focus = form.focus();

        for (y, row) in std::iter::zip(inner.y..inner.bottom(), rows) {
            let line = Rect {
                x: inner.x + 1,
                y,
                width: inner.width.saturating_sub(2),
                height: 1,
            };
            let input = Rect {
                x: line.x + LABEL_WIDTH,
                width: line.width.saturating_sub(LABEL_WIDTH),
                ..line
            };
            match row {
                Row::Blank => (),
                Row::Input(field) => {
                    let label_style = if form.error(field).is_some() {
                        ERROR_STYLE
                    } else {
                        BASE_STYLE
                    };
                    let label = Rect {
                        width: LABEL_WIDTH.min(line.width),
                        ..line
                    };
                    Span::styled(field.label(), label_style).render(label, buf);
                    let focused = focus == Control::Input(field);
                    let (text, style) = input_text(form.value(field), field, focused, input.width);
                    buf.set_style(input, if focused { FOCUS_STYLE } else { INPUT_STYLE });
                    Span::styled(text, style).render(input, buf);
                    form.hits.push((line, Control::Input(field)));
                }
                Row::Error(field) => {
                    if let Some(msg) = form.error(field) {
                        Span::styled(msg, ERROR_STYLE).render(input, buf);
                    }
                }
                Row::RememberMe => {
                    let mark = if form.remember_me() { 'x' } else { ' ' };
                    let text = format!("[{mark}] Remember me");
                    let style = if focus == Control::RememberMe {
                        FOCUS_STYLE
                    } else {
                        BASE_STYLE
                    };
                    Span::styled(text, style).render(line, buf);
                    form.hits.push((line, Control::RememberMe));
                }
                Row::Failure => {
                    if let Some(msg) = form.failure() {
                        Line::styled(msg, ERROR_STYLE).centered().render(line, buf);
                    }
                }
                Row::Submit => {
                    let label = format!("[ {} ]", kind.title());
                    let label_width = u16::try_from(label.len())
                        .unwrap_or(u16::MAX)
                        .min(line.width);
                    let button = Rect {
                        x: line.x + (line.width - label_width) / 2,
                        width: label_width,
                        ..line
                    };
                    let style = if focus == Control::Submit {
                        BUTTON_STYLE.patch(FOCUS_STYLE)
                    } else {
                        BUTTON_STYLE
                    };
                    Span::styled(label, style).render(button, buf);
                    form.hits.push((button, Control::Submit));
                }
                Row::Switch => {
                    let (prompt, link) = kind.switch_prompt();
                    let link_style = if focus == Control::Switch {
                        FOCUS_STYLE
                    } else {
                        LINK_STYLE
                    };
                    Line::from_iter([
                        Span::styled(prompt, MUTED_STYLE),
                        Span::styled(link, link_style),
                    ])
                    .render(line, buf);
                    form.hits.push((line, Control::Switch));
                }
            }
        }
    }
}

/// Text shown in a field's input area: the value (masked if secret, and
/// clipped to its last `width - 1` characters) or the placeholder
fn input_text(
    value: &str,
    field: Field,
    focused: bool,
    width: u16,
) -> (String, Style) {
    if value.is_empty() && !focused {
        return (field.placeholder().to_owned(), PLACEHOLDER_STYLE);
    }
    let count = value.chars().count();
    let room = usize::from(width.saturating_sub(1));
    let skip = count.saturating_sub(room);
    let mut text: String = if field.is_secret() {
        "•".repeat(count - skip)
    } else {
        value.chars().skip(skip).collect()
    };
    if focused {
        text.push('_');
    }
    let style = if focused { FOCUS_STYLE } else { INPUT_STYLE };
    (text, style)
}

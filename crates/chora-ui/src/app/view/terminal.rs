use iced::widget::{Column, Space, button, column, container, horizontal_space, row, scrollable, text, text_input};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Theme};

use chora_core::{LineKind, OutputLine};

use crate::app::{App, Message, terminal_input_id, terminal_output_id};
use crate::layout::STATUS_BAR_HEIGHT;
use crate::theme::colors;

const TERMINAL_TEXT_SIZE: u16 = 13;

fn line_color(kind: LineKind) -> Color {
    match kind {
        LineKind::Echo => colors::TERM_ECHO,
        LineKind::Stdout => colors::TEXT_PRIMARY,
        LineKind::Error => colors::TERM_ERROR,
        LineKind::Warning => colors::TERM_WARNING,
    }
}

fn header_button<'a>(label: &'a str, msg: Message) -> Element<'a, Message> {
    button(text(label).size(11).color(colors::TEXT_MUTED).font(Font::MONOSPACE))
        .padding(Padding::from([2, 6]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => Color::TRANSPARENT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: colors::TEXT_MUTED,
                border: Border {
                    radius: 3.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })
        .on_press(msg)
        .into()
}

impl App {
    pub fn view_terminal(&self) -> Element<'_, Message> {
        let cwd = self.terminal.working_directory().display().to_string();

        let mut header_row = row![
            text("TERMINAL").size(11).color(colors::TEXT_PRIMARY),
            Space::with_width(12),
            text(cwd).size(11).color(colors::TEXT_MUTED).font(Font::MONOSPACE),
            horizontal_space(),
        ]
        .spacing(4)
        .align_y(iced::Alignment::Center);

        if self.terminal.is_busy() {
            header_row = header_row.push(header_button("^C", Message::TerminalInterrupt));
        }
        header_row = header_row
            .push(header_button("clear", Message::TerminalClear))
            .push(header_button("x", Message::ToggleTerminal));

        let header = container(header_row)
            .padding(Padding::from([4, 8]))
            .width(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::TERM_HEADER_BG)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            });

        let lines: Vec<Element<'_, Message>> = self.terminal.output().map(Self::output_line).collect();
        let output = scrollable(
            Column::with_children(lines)
                .width(Length::Fill)
                .padding(Padding::from([4, 10])),
        )
        .id(terminal_output_id())
        .height(Length::Fill);

        let input = text_input("", &self.terminal_input)
            .id(terminal_input_id())
            .on_input(Message::TerminalInputChanged)
            .on_submit(Message::TerminalSubmit)
            .font(Font::MONOSPACE)
            .size(TERMINAL_TEXT_SIZE)
            .padding(Padding::from([4, 0]))
            .style(|_: &Theme, _status| text_input::Style {
                background: Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                icon: colors::TEXT_MUTED,
                placeholder: colors::TEXT_MUTED,
                value: colors::TEXT_PRIMARY,
                selection: colors::ACCENT,
            });

        let prompt_line = row![
            text(self.terminal.prompt())
                .size(TERMINAL_TEXT_SIZE)
                .font(Font::MONOSPACE)
                .color(colors::TERM_ECHO),
            input,
        ]
        .align_y(iced::Alignment::Center)
        .padding(Padding::from([2, 10]));

        let focus_border = if self.terminal_focused {
            colors::ACCENT
        } else {
            colors::BORDER
        };

        container(column![header, output, prompt_line])
            .width(Length::Fill)
            .height(Length::Fixed(self.terminal_height))
            .style(move |_| container::Style {
                background: Some(Background::Color(colors::TERM_BG)),
                border: Border {
                    color: focus_border,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn output_line(line: &OutputLine) -> Element<'_, Message> {
        text(line.text.as_str())
            .size(TERMINAL_TEXT_SIZE)
            .font(Font::MONOSPACE)
            .color(line_color(line.kind))
            .into()
    }

    pub fn view_status_bar(&self) -> Element<'_, Message> {
        let (cursor_info, language) = match self.current_tab() {
            Some(tab) => {
                let (line, col) = tab.content.cursor_position();
                (
                    format!("Ln {}, Col {}", line + 1, col + 1),
                    tab.document.language().name(),
                )
            }
            None => (String::new(), ""),
        };

        let status_content = row![
            text(self.status.message()).size(12).color(colors::TEXT_SECONDARY),
            horizontal_space(),
            text(cursor_info).size(12).color(colors::TEXT_PRIMARY),
            Space::with_width(24),
            text(language).size(12).color(colors::ACCENT),
            Space::with_width(12),
        ]
        .padding(Padding::from([6, 12]))
        .align_y(iced::Alignment::Center);

        container(status_content)
            .width(Length::Fill)
            .height(STATUS_BAR_HEIGHT)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_MEDIUM)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}

use iced::widget::text::{LineHeight, Wrapping};
use iced::widget::{Row, Space, button, container, horizontal_space, row, scrollable, text, text_editor};
use iced::{Background, Border, Color, Element, Length, Padding, Theme, alignment};

use chora_core::line_number_area_width;

use crate::app::{App, Message, TabInfo, editor_scroll_id};
use crate::highlighter::{EditorHighlighter, HighlightSettings};
use crate::layout::{self, EDITOR_PADDING};
use crate::theme::{EDITOR_FONT, EDITOR_LINE_HEIGHT, colors, monospace_char_width};

impl App {
    pub fn view_main_area(&self) -> Element<'_, Message> {
        let body = match self.current_tab() {
            Some(tab) => self.view_editor(tab),
            None => container(text("No file open").size(16).color(colors::TEXT_MUTED))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .style(|_| container::Style {
                    background: Some(Background::Color(colors::BG_DARK)),
                    ..Default::default()
                })
                .into(),
        };

        iced::widget::column![self.view_tabs(), body]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn view_tabs(&self) -> Element<'_, Message> {
        let mut tabs_vec: Vec<Element<'_, Message>> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(idx, tab)| Self::make_tab(tab, idx, self.active_tab == Some(idx)))
            .collect();

        tabs_vec.push(horizontal_space().into());

        let tabs_row = Row::with_children(tabs_vec)
            .spacing(1)
            .align_y(iced::Alignment::End);

        container(tabs_row)
            .width(Length::Fill)
            .height(layout::TAB_BAR_HEIGHT)
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

    fn make_tab(tab: &TabInfo, idx: usize, is_active: bool) -> Element<'_, Message> {
        let close_btn = button(text("x").size(12).color(colors::TEXT_MUTED))
            .padding(Padding::from([2, 6]))
            .style(|_, status| {
                let bg = match status {
                    button::Status::Hovered => colors::BG_HOVER,
                    _ => Color::TRANSPARENT,
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        radius: 2.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::CloseTab(idx));

        let tab_content = row![
            text(tab.label()).size(13).color(if is_active {
                colors::TEXT_PRIMARY
            } else {
                colors::TEXT_SECONDARY
            }),
            Space::with_width(8),
            close_btn,
        ]
        .align_y(iced::Alignment::Center);

        let bg = if is_active {
            colors::BG_DARK
        } else {
            colors::BG_MEDIUM
        };

        button(tab_content)
            .padding(Padding::from([8, 14]))
            .style(move |_, status| {
                let hover_bg = match status {
                    button::Status::Hovered if !is_active => colors::BG_HOVER,
                    _ => bg,
                };
                button::Style {
                    background: Some(Background::Color(hover_bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        color: if is_active {
                            colors::ACCENT
                        } else {
                            Color::TRANSPARENT
                        },
                        width: if is_active { 2.0 } else { 0.0 },
                        radius: 0.0.into(),
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::TabSelected(idx))
            .into()
    }

    fn view_editor<'a>(&'a self, tab: &'a TabInfo) -> Element<'a, Message> {
        let editor_settings = &self.settings.editor;
        let font_size = editor_settings.font_size as f32;
        let line_height = LineHeight::Relative(EDITOR_LINE_HEIGHT);
        let selection_color = Color::from_rgba(0.25, 0.46, 0.85, 0.55);

        let editor = text_editor(&tab.content)
            .padding(Padding {
                top: EDITOR_PADDING,
                right: 20.0,
                bottom: EDITOR_PADDING,
                left: 8.0,
            })
            .font(EDITOR_FONT)
            .size(font_size)
            .line_height(line_height)
            .wrapping(if editor_settings.word_wrap {
                Wrapping::Word
            } else {
                Wrapping::None
            })
            .style(move |_theme: &Theme, _status| text_editor::Style {
                background: Background::Color(colors::BG_DARK),
                border: Border {
                    width: 0.0,
                    radius: 0.0.into(),
                    color: Color::TRANSPARENT,
                },
                icon: colors::TEXT_MUTED,
                placeholder: colors::TEXT_MUTED,
                value: colors::TEXT_PRIMARY,
                selection: selection_color,
            })
            .highlight_with::<EditorHighlighter>(
                HighlightSettings {
                    language: tab.document.language(),
                },
                |highlight, _theme| highlight.to_format(),
            )
            .on_action(Message::EditorAction);

        let mut lines = Row::new();
        if self.settings.interface.show_line_numbers {
            let line_count = tab.content.line_count();
            let width = line_number_area_width(line_count, monospace_char_width(font_size));

            let gutter = container(
                text(layout::gutter_text(line_count))
                    .font(EDITOR_FONT)
                    .size(font_size)
                    .line_height(line_height)
                    .color(colors::GUTTER_TEXT)
                    .align_x(alignment::Horizontal::Right)
                    .width(Length::Fill),
            )
            .width(Length::Fixed(width))
            .padding(Padding {
                top: EDITOR_PADDING,
                right: 4.0,
                bottom: EDITOR_PADDING,
                left: 0.0,
            })
            .style(|_| container::Style {
                background: Some(Background::Color(colors::GUTTER_BG)),
                ..Default::default()
            });
            lines = lines.push(gutter);
        }
        lines = lines.push(editor);

        let view = scrollable(lines)
            .id(editor_scroll_id())
            .width(Length::Fill)
            .height(Length::Fill)
            .on_scroll(Message::EditorScrolled);

        container(view)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_DARK)),
                ..Default::default()
            })
            .into()
    }
}

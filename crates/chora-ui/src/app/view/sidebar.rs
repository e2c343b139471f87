use iced::widget::{Column, Space, button, column, container, row, scrollable, text};
use iced::{Background, Border, Color, Element, Font, Length, Padding};

use chora_core::FileNode;
use chora_syntax::Language;

use crate::app::{App, Message};
use crate::theme::colors;

impl App {
    pub fn view_sidebar(&self) -> Element<'_, Message> {
        let folder_name = self
            .file_tree
            .as_ref()
            .and_then(|tree| tree.root_path().file_name())
            .map(|name| name.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "EXPLORER".to_string());

        let header = container(text(folder_name).size(11).color(colors::TEXT_SECONDARY))
            .padding(Padding::from([10, 12]))
            .width(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_MEDIUM)),
                ..Default::default()
            });

        let file_content: Element<'_, Message> = match &self.file_tree {
            Some(tree) => {
                let items: Vec<Element<'_, Message>> = tree
                    .visible()
                    .into_iter()
                    .map(|(depth, node)| self.make_file_item(depth, node))
                    .collect();

                scrollable(Column::with_children(items).spacing(1).width(Length::Fill))
                    .height(Length::Fill)
                    .into()
            }
            None => container(
                column![
                    Space::with_height(40),
                    text("No folder open").size(13).color(colors::TEXT_MUTED),
                    Space::with_height(16),
                    button(text("Open Folder").size(13).color(colors::ACCENT))
                        .padding(Padding::from([8, 16]))
                        .style(|_, status| {
                            let bg = match status {
                                button::Status::Hovered => colors::BG_HOVER,
                                _ => colors::BG_LIGHT,
                            };
                            button::Style {
                                background: Some(Background::Color(bg)),
                                text_color: colors::ACCENT,
                                border: Border {
                                    color: colors::ACCENT,
                                    width: 1.0,
                                    radius: 4.0.into(),
                                },
                                ..Default::default()
                            }
                        })
                        .on_press(Message::OpenFolder),
                ]
                .align_x(iced::Alignment::Center)
                .width(Length::Fill),
            )
            .height(Length::Fill)
            .into(),
        };

        container(column![header, file_content])
            .width(Length::Fixed(self.sidebar_width))
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_LIGHT)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn make_file_item(&self, depth: usize, node: &FileNode) -> Element<'_, Message> {
        let icon = if node.is_directory() {
            if node.expanded { "[-]" } else { "[+]" }
        } else {
            file_icon(Language::from_path(&node.path))
        };

        let is_active = self
            .current_tab()
            .and_then(|tab| tab.document.path())
            .is_some_and(|p| p == node.path.as_path());

        let bg = if is_active {
            colors::BG_ACTIVE
        } else {
            Color::TRANSPARENT
        };

        let indent = (depth * 16 + 8) as f32;
        let path = node.path.clone();

        button(
            row![
                Space::with_width(Length::Fixed(indent)),
                text(icon).size(12).font(Font::MONOSPACE).color(colors::TEXT_MUTED),
                Space::with_width(6),
                text(node.name.clone()).size(13).color(if is_active {
                    colors::TEXT_PRIMARY
                } else {
                    colors::TEXT_SECONDARY
                }),
            ]
            .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::from([4, 0]))
        .style(move |_, status| {
            let hover_bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => bg,
            };
            button::Style {
                background: Some(Background::Color(hover_bg)),
                text_color: colors::TEXT_PRIMARY,
                border: Border::default(),
                ..Default::default()
            }
        })
        .on_press(if node.is_directory() {
            Message::ToggleFolder(path)
        } else {
            Message::FileClicked(path)
        })
        .into()
    }
}

fn file_icon(language: Language) -> &'static str {
    match language {
        Language::Cpp => "c++",
        Language::Rust => " rs",
        Language::Python => " py",
        Language::Shell => " sh",
        Language::PlainText => "  .",
    }
}

use iced::widget::{Space, button, checkbox, column, container, horizontal_space, row, text, text_input};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};

use crate::app::{APP_DESCRIPTION, APP_NAME, APP_VERSION, App, Message, SettingToggle, SettingsDraft};
use crate::theme::colors;

fn primary_button<'a>(label: &'a str, msg: Message) -> Element<'a, Message> {
    button(text(label).size(13).color(Color::WHITE))
        .padding(Padding::from([8, 20]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => Color::from_rgb(0.40, 0.58, 0.95),
                _ => colors::ACCENT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: Color::WHITE,
                border: Border {
                    radius: 4.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })
        .on_press(msg)
        .into()
}

fn secondary_button<'a>(label: &'a str, msg: Message) -> Element<'a, Message> {
    button(text(label).size(13).color(colors::TEXT_PRIMARY))
        .padding(Padding::from([8, 20]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => colors::BG_LIGHT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: colors::TEXT_PRIMARY,
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press(msg)
        .into()
}

fn group<'a>(title: &'a str, content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    column![
        text(title).size(12).color(colors::TEXT_SECONDARY),
        container(content)
            .padding(Padding::from([10, 12]))
            .width(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_LIGHT)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }),
    ]
    .spacing(6)
    .into()
}

fn toggle<'a>(draft: &SettingsDraft, label: &'a str, which: SettingToggle) -> Element<'a, Message> {
    checkbox(label, draft.toggle(which))
        .on_toggle(move |value| Message::SettingToggled(which, value))
        .size(16)
        .text_size(13)
        .into()
}

/// Centers `content` in a bordered card over the whole window.
fn modal_card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(container(content).style(|_| container::Style {
        background: Some(Background::Color(colors::BG_MEDIUM)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }))
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

impl App {
    pub fn view_settings_modal(&self) -> Element<'_, Message> {
        let Some(draft) = &self.settings_dialog else {
            return Space::new(0, 0).into();
        };

        let interface = group(
            "Interface",
            column![
                toggle(draft, "Show File Tree", SettingToggle::FileTree),
                toggle(draft, "Show Line Numbers", SettingToggle::LineNumbers),
                toggle(draft, "Show Status Bar", SettingToggle::StatusBar),
            ]
            .spacing(8),
        );

        let font_size = row![
            text("Font Size").size(13).color(colors::TEXT_PRIMARY),
            horizontal_space(),
            secondary_button("-", Message::FontSizeStep(-1)),
            container(
                text(draft.settings.editor.font_size.to_string())
                    .size(13)
                    .color(colors::TEXT_PRIMARY)
            )
            .center_x(Length::Fixed(40.0)),
            secondary_button("+", Message::FontSizeStep(1)),
        ]
        .spacing(4)
        .align_y(iced::Alignment::Center);

        let editor = group(
            "Editor",
            column![font_size, toggle(draft, "Word Wrap", SettingToggle::WordWrap)].spacing(8),
        );

        let interval = row![
            text("Interval (seconds)").size(13).color(colors::TEXT_PRIMARY),
            horizontal_space(),
            text_input("30", &draft.interval_input)
                .on_input(Message::AutoSaveIntervalChanged)
                .on_submit(Message::SettingsOk)
                .padding(Padding::from([6, 10]))
                .size(13)
                .width(Length::Fixed(80.0)),
        ]
        .align_y(iced::Alignment::Center);

        let auto_save = group(
            "Auto Save",
            column![toggle(draft, "Enable Auto Save", SettingToggle::AutoSave), interval].spacing(8),
        );

        let buttons = row![
            horizontal_space(),
            secondary_button("Cancel", Message::SettingsCancel),
            secondary_button("Apply", Message::SettingsApply),
            primary_button("OK", Message::SettingsOk),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        let modal_content = column![
            text("Settings").size(16).color(colors::TEXT_PRIMARY),
            Space::with_height(4),
            interface,
            editor,
            auto_save,
            Space::with_height(4),
            buttons,
        ]
        .spacing(12)
        .padding(24)
        .width(Length::Fixed(400.0));

        modal_card(modal_content)
    }

    pub fn view_about_modal(&self) -> Element<'_, Message> {
        let modal_content = column![
            text(APP_NAME).size(20).color(colors::ACCENT),
            Space::with_height(8),
            text(APP_DESCRIPTION).size(13).color(colors::TEXT_SECONDARY),
            Space::with_height(12),
            text(format!("Version {}", APP_VERSION)).size(12).color(colors::TEXT_MUTED),
            Space::with_height(20),
            primary_button("Close", Message::HideAbout),
        ]
        .padding(24)
        .width(Length::Fixed(340.0))
        .align_x(iced::Alignment::Center);

        modal_card(modal_content)
    }
}

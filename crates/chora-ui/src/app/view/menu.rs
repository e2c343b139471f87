use iced::widget::{Column, Row, Space, button, column, container, horizontal_space, row, text};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};

use crate::app::{App, Message, TopMenu};
use crate::layout::TOOLBAR_HEIGHT;
use crate::theme::colors;

impl App {
    pub fn view_toolbar(&self) -> Element<'_, Message> {
        let mut menu_items: Vec<Element<'_, Message>> = Vec::new();

        for menu in TopMenu::ALL {
            let is_active = self.active_menu == Some(menu);

            let menu_btn = button(text(menu.label()).size(12).color(if is_active {
                colors::TEXT_PRIMARY
            } else {
                colors::TEXT_SECONDARY
            }))
            .padding(Padding::from([6, 10]))
            .style(move |_: &Theme, status: button::Status| {
                let bg = if is_active {
                    colors::BG_ACTIVE
                } else {
                    match status {
                        button::Status::Hovered => colors::BG_HOVER,
                        _ => colors::BG_MEDIUM,
                    }
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::ToggleTopMenu(menu));

            menu_items.push(menu_btn.into());
        }

        menu_items.push(horizontal_space().into());

        let toolbar = Row::with_children(menu_items)
            .spacing(2)
            .padding(Padding::from([4, 8]))
            .align_y(iced::Alignment::Center);

        container(toolbar)
            .width(Length::Fill)
            .height(TOOLBAR_HEIGHT)
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

    pub fn menu_item<'a>(label: &'a str, shortcut: &'a str, msg: Message) -> Element<'a, Message> {
        button(
            row![
                text(label).size(12).color(colors::TEXT_PRIMARY),
                horizontal_space(),
                text(shortcut).size(11).color(colors::TEXT_MUTED),
            ]
            .width(Length::Fill)
            .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::from([6, 16]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => Color::TRANSPARENT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: colors::TEXT_PRIMARY,
                border: Border::default(),
                ..Default::default()
            }
        })
        .on_press(msg)
        .into()
    }

    pub fn menu_separator<'a>() -> Element<'a, Message> {
        container(Space::new(Length::Fill, 1))
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BORDER)),
                ..Default::default()
            })
            .into()
    }

    pub fn view_menu_dropdown(&self) -> Element<'_, Message> {
        let Some(menu) = self.active_menu else {
            return Space::new(0, 0).into();
        };

        let items: Vec<Element<'_, Message>> = match menu {
            TopMenu::File => vec![
                Self::menu_item("New File", "Ctrl+N", Message::NewFile),
                Self::menu_item("Open File...", "Ctrl+O", Message::OpenFile),
                Self::menu_item("Open Folder...", "", Message::OpenFolder),
                Self::menu_separator(),
                Self::menu_item("Close Tab", "Ctrl+W", Message::CloseCurrentTab),
                Self::menu_separator(),
                Self::menu_item("Exit", "", Message::Exit),
            ],
            TopMenu::Edit => vec![
                Self::menu_item("Save File", "Ctrl+S", Message::Save),
                Self::menu_item("Save As...", "Ctrl+Shift+S", Message::SaveAs),
            ],
            TopMenu::Terminal => vec![
                Self::menu_item("Toggle Terminal", "Ctrl+`", Message::ToggleTerminal),
                Self::menu_separator(),
                Self::menu_item("Clear", "", Message::TerminalClear),
                Self::menu_item("Interrupt", "", Message::TerminalInterrupt),
            ],
            TopMenu::Settings => vec![Self::menu_item("Preferences...", "", Message::OpenSettings)],
            TopMenu::Info => vec![Self::menu_item("About", "", Message::ShowAbout)],
        };

        let menu_content = Column::with_children(items)
            .width(Length::Fixed(240.0))
            .padding(4);

        let menu_offset_x = match menu {
            TopMenu::File => 8.0,
            TopMenu::Edit => 46.0,
            TopMenu::Terminal => 86.0,
            TopMenu::Settings => 158.0,
            TopMenu::Info => 226.0,
        };

        let menu_box = container(menu_content).style(|_| container::Style {
            background: Some(Background::Color(colors::BG_MEDIUM)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        });

        column![
            Space::with_height(Length::Fixed(TOOLBAR_HEIGHT)),
            row![Space::with_width(Length::Fixed(menu_offset_x)), menu_box],
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

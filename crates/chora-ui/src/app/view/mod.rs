pub mod dialogs;
pub mod editor;
pub mod menu;
pub mod sidebar;
pub mod terminal;

use iced::widget::{Space, column, container, mouse_area, row, stack};
use iced::{Background, Color, Element, Length};

use crate::app::{App, Message};
use crate::theme::colors;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let interface = &self.settings.interface;

        let mut main_column = column![self.view_main_area()].height(Length::Fill);
        if interface.show_terminal {
            main_column = main_column.push(self.view_terminal());
        }

        let mut body = row![].height(Length::Fill);
        if interface.show_file_tree {
            body = body.push(self.view_sidebar());
        }
        body = body.push(main_column);

        let mut content = column![self.view_toolbar(), body];
        if interface.show_status_bar {
            content = content.push(self.view_status_bar());
        }

        let main_view: Element<'_, Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_DARK)),
                ..Default::default()
            })
            .into();

        if self.settings_dialog.is_some() {
            stack![
                main_view,
                Self::backdrop(Message::SettingsCancel),
                self.view_settings_modal(),
            ]
            .into()
        } else if self.about_visible {
            stack![
                main_view,
                Self::backdrop(Message::HideAbout),
                self.view_about_modal(),
            ]
            .into()
        } else if self.active_menu.is_some() {
            stack![
                mouse_area(
                    container(Space::new(Length::Fill, Length::Fill))
                        .width(Length::Fill)
                        .height(Length::Fill)
                )
                .on_press(Message::CloseTopMenu),
                main_view,
                self.view_menu_dropdown(),
            ]
            .into()
        } else {
            main_view
        }
    }

    /// Dimmed layer behind a modal; clicking it sends `on_press`.
    fn backdrop<'a>(on_press: Message) -> Element<'a, Message> {
        mouse_area(
            container(Space::new(Length::Fill, Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_| container::Style {
                    background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.5))),
                    ..Default::default()
                }),
        )
        .on_press(on_press)
        .into()
    }
}

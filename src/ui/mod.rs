use iced::{
    widget::{button, column, container, row, scrollable, text, Column, Row, Space},
    Alignment, Color, Element, Length,
};

use crate::domain::resume::{ContactKind, ContactLink, Credential, Experience, Resume, SkillCategory};

const ACCENT: Color = Color::from_rgb(0.29, 0.87, 0.50);
const MUTED: Color = Color::from_rgb(0.58, 0.64, 0.72);
const SKILLS_PER_ROW: usize = 3;

/// Main view state
pub struct ResumeView {
    pub resume: Resume,
    pub status_message: String,
    pub is_downloading: bool,
}

impl ResumeView {
    pub fn new(resume: Resume) -> Self {
        Self {
            resume,
            status_message: String::new(),
            is_downloading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ResumeMessage {
    DownloadPressed,
    /// A contact or project link was clicked; carries its href.
    LinkPressed(String),
}

impl ResumeView {
    /// The trigger only accepts presses while no download is running.
    pub fn download_enabled(&self) -> bool {
        !self.is_downloading
    }

    pub fn download_label(&self) -> &'static str {
        if self.is_downloading {
            "Downloading..."
        } else {
            "Download Resume"
        }
    }

    pub fn view(&self) -> Element<'_, ResumeMessage> {
        let page = column![
            self.hero(),
            section("About Me", text(&self.resume.about).size(18).into()),
            section("Skills", self.skills()),
            section("Experience", self.experience()),
            section("Featured Project", self.project()),
            row![
                credential_card(&self.resume.education),
                credential_card(&self.resume.military),
            ]
            .spacing(24),
            self.footer(),
        ]
        .padding(40)
        .spacing(48)
        .max_width(1000.0);

        scrollable(container(page).center_x(Length::Fill)).into()
    }

    fn hero(&self) -> Element<'_, ResumeMessage> {
        let profile = &self.resume.profile;

        let contacts = Row::with_children(self.resume.contacts.iter().map(contact_button)).spacing(12);

        let download = button(text(self.download_label()).size(18))
            .on_press_maybe(self.download_enabled().then_some(ResumeMessage::DownloadPressed))
            .padding([12, 32]);

        let mut hero = column![
            text(&profile.name).size(56),
            text(&profile.title).size(28).color(ACCENT),
            text(&profile.location).size(18).color(MUTED),
            Space::new().height(Length::Fixed(12.0)),
            contacts,
            Space::new().height(Length::Fixed(12.0)),
            download,
        ]
        .spacing(8)
        .align_x(Alignment::Center);

        if !self.status_message.is_empty() {
            hero = hero.push(text(&self.status_message).size(14).color(MUTED));
        }

        container(hero).center_x(Length::Fill).padding([60, 0]).into()
    }

    fn skills(&self) -> Element<'_, ResumeMessage> {
        Column::with_children(self.resume.skills.chunks(SKILLS_PER_ROW).map(|chunk| {
            Row::with_children(chunk.iter().map(skill_card))
                .spacing(24)
                .into()
        }))
        .spacing(24)
        .into()
    }

    // Timeline, newest first as listed.
    fn experience(&self) -> Element<'_, ResumeMessage> {
        Column::with_children(self.resume.experience.iter().map(experience_card))
            .spacing(32)
            .into()
    }

    fn project(&self) -> Element<'_, ResumeMessage> {
        let project = &self.resume.featured_project;
        let header = row![
            text(&project.name).size(28),
            button(text("Open").size(14))
                .on_press(ResumeMessage::LinkPressed(project.link.clone()))
                .style(button::text),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        column![
            header,
            text(&project.description).size(17).color(MUTED),
            text(project.technologies.join("  ·  ")).size(14).color(ACCENT),
        ]
        .spacing(16)
        .into()
    }

    fn footer(&self) -> Element<'_, ResumeMessage> {
        let links = Row::with_children(self.resume.footer_contacts().map(|contact| {
            button(text(contact_glyph(contact.kind)))
                .on_press(ResumeMessage::LinkPressed(contact.href.clone()))
                .style(button::text)
                .into()
        }))
        .spacing(24);

        container(
            column![text(&self.resume.footer_tagline).size(18).color(MUTED), links]
                .spacing(16)
                .align_x(Alignment::Center),
        )
        .center_x(Length::Fill)
        .padding([32, 0])
        .into()
    }
}

fn section<'a>(title: &'a str, body: Element<'a, ResumeMessage>) -> Element<'a, ResumeMessage> {
    column![
        container(text(title).size(40)).center_x(Length::Fill),
        body,
    ]
    .spacing(32)
    .into()
}

fn contact_glyph(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Email => "✉",
        ContactKind::Phone => "☎",
        ContactKind::Linkedin => "in",
        ContactKind::Github => "GH",
    }
}

fn contact_button(contact: &ContactLink) -> Element<'_, ResumeMessage> {
    button(text(format!("{}  {}", contact_glyph(contact.kind), contact.label)))
        .on_press(ResumeMessage::LinkPressed(contact.href.clone()))
        .style(button::secondary)
        .padding([8, 20])
        .into()
}

fn skill_card(category: &SkillCategory) -> Element<'_, ResumeMessage> {
    container(
        column![
            text(&category.name).size(20),
            text(category.items.join("  ·  ")).size(15).color(ACCENT),
        ]
        .spacing(12),
    )
    .padding(20)
    .width(Length::FillPortion(1))
    .into()
}

fn experience_card(job: &Experience) -> Element<'_, ResumeMessage> {
    let achievements = Column::with_children(
        job.achievements
            .iter()
            .map(|a| text(format!("•  {}", a)).size(16).color(MUTED).into()),
    )
    .spacing(6);

    column![
        text(&job.period).size(14).color(ACCENT),
        text(&job.company).size(24),
        text(&job.role).size(18).color(ACCENT),
        achievements,
    ]
    .spacing(6)
    .into()
}

fn credential_card(credential: &Credential) -> Element<'_, ResumeMessage> {
    container(
        column![
            text(&credential.heading).size(24),
            text(&credential.title).size(19),
            text(&credential.institution).color(MUTED),
            text(&credential.period).size(14).color(MUTED),
        ]
        .spacing(8),
    )
    .padding(24)
    .width(Length::FillPortion(1))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_trigger_tracks_busy_flag() {
        let mut view = ResumeView::new(Resume::embedded().unwrap());
        assert_eq!(view.download_label(), "Download Resume");
        assert!(view.download_enabled());

        view.is_downloading = true;
        assert_eq!(view.download_label(), "Downloading...");
        assert!(!view.download_enabled());
    }
}

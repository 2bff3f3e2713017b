use serenity::all::{Colour, CreateEmbed};

const TITLE: &str = "Backup Status";
const DESCRIPTION: &str = "The status of the current backup process.";
const THUMBNAIL_URL: &str = "https://i.imgur.com/FCpL3hl.png";

pub const CHANNELS_FIELD: &str = "Number of backed up channels:";
pub const MESSAGES_FIELD: &str = "Number of backed up messages (total):";
pub const LATEST_FIELD: &str = "Latest update:";
pub const LINK_FIELD: &str = "Data download link:";

/// Archive link shown once the upload stage resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArchiveLink {
    /// Upload has not happened yet, the field is not displayed.
    #[default]
    Pending,
    /// Upload succeeded with a share link.
    Shared(String),
    /// Upload finished without producing a link.
    Unavailable,
}

/// The four logical fields of the live status display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressStatus {
    pub completed_channels: usize,
    pub total_channels: usize,
    pub messages: usize,
    pub latest: String,
    pub link: ArchiveLink,
}

impl ProgressStatus {
    /// Renders the channel counter, e.g. `2/5`.
    pub fn channel_counter(&self) -> String {
        format!("{}/{}", self.completed_channels, self.total_channels)
    }

    /// Builds the status embed posted to Discord.
    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(TITLE)
            .description(DESCRIPTION)
            .colour(Colour::GOLD)
            .thumbnail(THUMBNAIL_URL)
            .field(CHANNELS_FIELD, self.channel_counter(), false)
            .field(MESSAGES_FIELD, self.messages.to_string(), false)
            .field(LATEST_FIELD, &self.latest, false);

        match &self.link {
            ArchiveLink::Pending => {}
            ArchiveLink::Shared(link) => embed = embed.field(LINK_FIELD, link, false),
            ArchiveLink::Unavailable => embed = embed.field(LINK_FIELD, "None", false),
        }

        embed
    }
}

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Bearer token as stored by the token manager. The token is supplied by an
/// external authentication flow; sposplit only reads and stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// One track read from the source playlist. `artist_id` is the lead artist
/// (first listed); tracks without any artist id fall into the unclassified
/// bucket without a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub artist_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistTrackItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: PlaylistTracksRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub href: String,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

/// Terminal state of one genre after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStatus {
    Success,
    PartialFailure,
    Failure,
}

impl std::fmt::Display for SplitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitStatus::Success => write!(f, "success"),
            SplitStatus::PartialFailure => write!(f, "partial failure"),
            SplitStatus::Failure => write!(f, "failure"),
        }
    }
}

/// One record per genre encountered during a run, in genre first-seen order.
/// `track_count` is the number of tracks actually added to the destination
/// playlist, which is less than the bucket size on partial failures.
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub genre: String,
    pub destination_playlist_id: Option<String>,
    pub track_count: usize,
    pub status: SplitStatus,
}

#[derive(Tabled)]
pub struct SplitResultRow {
    pub genre: String,
    pub playlist: String,
    pub tracks: String,
    pub status: String,
}

impl From<&SplitResult> for SplitResultRow {
    fn from(result: &SplitResult) -> Self {
        SplitResultRow {
            genre: result.genre.clone(),
            playlist: result
                .destination_playlist_id
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            tracks: result.track_count.to_string(),
            status: result.status.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub id: String,
    pub tracks: u64,
}

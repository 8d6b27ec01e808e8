use std::{env, path::PathBuf, process};

use tidal2deezer::management::{ErrorLog, LogEntry};

fn scratch_file(label: &str) -> PathBuf {
    env::temp_dir().join(format!("t2d-errorlog-{label}-{}.txt", process::id()))
}

#[test]
fn test_entries_render_with_category_prefix() {
    assert_eq!(
        LogEntry::Playlist {
            name: "Road Trip".into()
        }
        .render(),
        "playlist: Road Trip"
    );
    assert_eq!(
        LogEntry::Artist {
            name: "Artist X".into()
        }
        .render(),
        "artist: Artist X"
    );
    assert_eq!(
        LogEntry::Album {
            name: "Album Z".into(),
            artist: "Artist X".into()
        }
        .render(),
        "album: Album Z by Artist X"
    );
    assert_eq!(
        LogEntry::Track {
            name: "Song B".into(),
            artist: "Artist Y".into()
        }
        .render(),
        "track: Song B by Artist Y"
    );
    assert_eq!(
        LogEntry::Other {
            context: "Road Trip".into()
        }
        .render(),
        "unknown error about Road Trip"
    );
}

#[tokio::test]
async fn test_append_creates_file_and_accumulates_lines() {
    let path = scratch_file("append");
    let log = ErrorLog::new(path.clone());

    log.append(LogEntry::Track {
        name: "Song B".into(),
        artist: "Artist Y".into(),
    })
    .await
    .unwrap();
    log.append(LogEntry::Artist {
        name: "Artist Q".into(),
    })
    .await
    .unwrap();

    let content = async_fs::read_to_string(&path).await.unwrap();
    async_fs::remove_file(&path).await.unwrap();

    assert_eq!(content, "track: Song B by Artist Y\nartist: Artist Q\n");
}

#[tokio::test]
async fn test_reopened_log_appends_without_truncating() {
    let path = scratch_file("reopen");

    // Separate handles on the same path, as two consecutive runs would use.
    ErrorLog::new(path.clone())
        .append(LogEntry::Track {
            name: "Song B".into(),
            artist: "Artist Y".into(),
        })
        .await
        .unwrap();
    ErrorLog::new(path.clone())
        .append(LogEntry::Artist {
            name: "Artist Q".into(),
        })
        .await
        .unwrap();

    let content = async_fs::read_to_string(&path).await.unwrap();
    async_fs::remove_file(&path).await.unwrap();

    assert_eq!(content, "track: Song B by Artist Y\nartist: Artist Q\n");
}

#[tokio::test]
async fn test_append_preserves_existing_content() {
    let path = scratch_file("preserve");
    async_fs::write(&path, "track: Old Miss by Someone\n").await.unwrap();

    let log = ErrorLog::new(path.clone());
    log.append(LogEntry::Playlist {
        name: "Road Trip".into(),
    })
    .await
    .unwrap();

    let content = async_fs::read_to_string(&path).await.unwrap();
    async_fs::remove_file(&path).await.unwrap();

    assert_eq!(
        content,
        "track: Old Miss by Someone\nplaylist: Road Trip\n"
    );
}

use std::{cell::RefCell, env, future::Future, path::PathBuf, process, rc::Rc};

use tidal2deezer::{
    cli::{PlaylistDestination, collect_destination_tracks, publish_playlist},
    deezer::{DeezerError, Outcome},
    management::ErrorLog,
    tidal::owned_by,
    types::{TidalArtist, TidalCreator, TidalPlaylist, TidalTrack},
};

fn scratch_log(label: &str) -> PathBuf {
    env::temp_dir().join(format!("t2d-playlists-{label}-{}.txt", process::id()))
}

fn track(id: u64, title: &str, artist: &str) -> TidalTrack {
    TidalTrack {
        id,
        title: title.to_string(),
        artist: Some(TidalArtist {
            id: id + 1000,
            name: artist.to_string(),
        }),
    }
}

#[tokio::test]
async fn test_misses_are_logged_and_skipped() {
    let path = scratch_log("misses");
    let log = ErrorLog::new(path.clone());
    let tracks = vec![
        track(1, "Song A", "Artist X"),
        track(2, "Song B", "Artist Y"),
    ];

    let matched = collect_destination_tracks(
        &tracks,
        async |t: &TidalTrack| {
            Ok::<_, DeezerError>(if t.title == "Song A" { Some(901) } else { None })
        },
        &log,
    )
    .await
    .unwrap();

    let content = async_fs::read_to_string(&path).await.unwrap();
    async_fs::remove_file(&path).await.unwrap();

    assert_eq!(matched.len(), 1);
    assert!(matched.contains(&901));
    assert_eq!(content, "track: Song B by Artist Y\n");
}

#[tokio::test]
async fn test_duplicate_destination_ids_collapse() {
    let path = scratch_log("dedup");
    let log = ErrorLog::new(path.clone());
    // Two source tracks resolving to the same canonical recording.
    let tracks = vec![
        track(1, "Song A", "Artist X"),
        track(2, "Song A (Remastered)", "Artist X"),
    ];

    let matched = collect_destination_tracks(
        &tracks,
        async |_t: &TidalTrack| Ok::<_, DeezerError>(Some(7)),
        &log,
    )
    .await
    .unwrap();

    assert_eq!(matched.len(), 1);
    assert!(matched.contains(&7));
    // Both tracks matched, nothing reaches the log.
    assert!(async_fs::read_to_string(&path).await.is_err());
}

#[tokio::test]
async fn test_search_errors_abort_collection() {
    let path = scratch_log("errors");
    let log = ErrorLog::new(path.clone());
    let tracks = vec![track(1, "Song A", "Artist X")];

    let result = collect_destination_tracks(
        &tracks,
        async |_t: &TidalTrack| {
            Err::<Option<u64>, _>(DeezerError::Auth("refresh failed".to_string()))
        },
        &log,
    )
    .await;

    assert!(result.is_err());
}

/// Scripted destination recording the order of calls against it.
struct ScriptedDestination {
    events: Rc<RefCell<Vec<&'static str>>>,
    existing_playlist: bool,
    fail_add: bool,
}

impl ScriptedDestination {
    fn new(events: Rc<RefCell<Vec<&'static str>>>) -> Self {
        Self {
            events,
            existing_playlist: false,
            fail_add: false,
        }
    }
}

impl PlaylistDestination for ScriptedDestination {
    fn create_playlist(
        &mut self,
        _title: &str,
    ) -> impl Future<Output = Result<Outcome<u64>, DeezerError>> {
        self.events.borrow_mut().push("create");
        let existing = self.existing_playlist;
        async move {
            if existing {
                Ok(Outcome::AlreadyExists)
            } else {
                Ok(Outcome::Completed(501))
            }
        }
    }

    fn add_tracks(
        &mut self,
        _playlist_id: u64,
        _track_ids: &[u64],
    ) -> impl Future<Output = Result<Outcome<()>, DeezerError>> {
        self.events.borrow_mut().push("add");
        let fail = self.fail_add;
        async move {
            if fail {
                Err(DeezerError::Api {
                    code: 500,
                    message: "add failed".to_string(),
                })
            } else {
                Ok(Outcome::Completed(()))
            }
        }
    }
}

#[tokio::test]
async fn test_owned_source_deleted_only_after_add_succeeds() {
    let path = scratch_log("publish-ok");
    let log = ErrorLog::new(path.clone());
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut dest = ScriptedDestination::new(Rc::clone(&events));

    let recorder = Rc::clone(&events);
    publish_playlist(
        &mut dest,
        "Road Trip",
        &[901, 902],
        true,
        true,
        async || {
            recorder.borrow_mut().push("delete");
            Ok(())
        },
        &log,
    )
    .await
    .unwrap();

    assert_eq!(*events.borrow(), vec!["create", "add", "delete"]);
    // Full success leaves no log entries behind.
    assert!(async_fs::read_to_string(&path).await.is_err());
}

#[tokio::test]
async fn test_failed_add_aborts_before_delete() {
    let path = scratch_log("publish-addfail");
    let log = ErrorLog::new(path.clone());
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut dest = ScriptedDestination::new(Rc::clone(&events));
    dest.fail_add = true;

    let recorder = Rc::clone(&events);
    let result = publish_playlist(
        &mut dest,
        "Road Trip",
        &[901],
        true,
        true,
        async || {
            recorder.borrow_mut().push("delete");
            Ok(())
        },
        &log,
    )
    .await;

    assert!(result.is_err());
    assert_eq!(*events.borrow(), vec!["create", "add"]);
}

#[tokio::test]
async fn test_unowned_playlist_is_never_deleted() {
    let path = scratch_log("publish-unowned");
    let log = ErrorLog::new(path.clone());
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut dest = ScriptedDestination::new(Rc::clone(&events));

    let recorder = Rc::clone(&events);
    publish_playlist(
        &mut dest,
        "Editorial Hits",
        &[901],
        false,
        true,
        async || {
            recorder.borrow_mut().push("delete");
            Ok(())
        },
        &log,
    )
    .await
    .unwrap();

    assert_eq!(*events.borrow(), vec!["create", "add"]);
}

#[tokio::test]
async fn test_remove_flag_off_keeps_owned_playlist() {
    let path = scratch_log("publish-keep");
    let log = ErrorLog::new(path.clone());
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut dest = ScriptedDestination::new(Rc::clone(&events));

    let recorder = Rc::clone(&events);
    publish_playlist(
        &mut dest,
        "Road Trip",
        &[901],
        true,
        false,
        async || {
            recorder.borrow_mut().push("delete");
            Ok(())
        },
        &log,
    )
    .await
    .unwrap();

    assert_eq!(*events.borrow(), vec!["create", "add"]);
}

#[tokio::test]
async fn test_existing_destination_playlist_is_logged_and_skipped() {
    let path = scratch_log("publish-exists");
    let log = ErrorLog::new(path.clone());
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut dest = ScriptedDestination::new(Rc::clone(&events));
    dest.existing_playlist = true;

    let recorder = Rc::clone(&events);
    publish_playlist(
        &mut dest,
        "Road Trip",
        &[901],
        true,
        true,
        async || {
            recorder.borrow_mut().push("delete");
            Ok(())
        },
        &log,
    )
    .await
    .unwrap();

    let content = async_fs::read_to_string(&path).await.unwrap();
    async_fs::remove_file(&path).await.unwrap();

    // Neither tracks added nor the source touched, just the log entry.
    assert_eq!(*events.borrow(), vec!["create"]);
    assert_eq!(content, "playlist: Road Trip\n");
}

fn playlist(creator: Option<TidalCreator>) -> TidalPlaylist {
    TidalPlaylist {
        uuid: "u1".to_string(),
        title: "Road Trip".to_string(),
        number_of_tracks: Some(2),
        creator,
    }
}

#[test]
fn test_ownership_requires_matching_creator_id() {
    assert!(owned_by(&playlist(Some(TidalCreator { id: Some(42) })), 42));
    assert!(!owned_by(&playlist(Some(TidalCreator { id: Some(7) })), 42));
    // Editorial playlists carry no creator id and are never owned.
    assert!(!owned_by(&playlist(Some(TidalCreator { id: None })), 42));
    assert!(!owned_by(&playlist(None), 42));
}

#[tokio::test]
async fn test_missing_artist_logs_empty_artist_field() {
    let path = scratch_log("noartist");
    let log = ErrorLog::new(path.clone());
    let tracks = vec![TidalTrack {
        id: 3,
        title: "Untagged".to_string(),
        artist: None,
    }];

    let matched = collect_destination_tracks(
        &tracks,
        async |_t: &TidalTrack| Ok::<_, DeezerError>(None),
        &log,
    )
    .await
    .unwrap();

    let content = async_fs::read_to_string(&path).await.unwrap();
    async_fs::remove_file(&path).await.unwrap();

    assert!(matched.is_empty());
    assert_eq!(content, "track: Untagged by \n");
}

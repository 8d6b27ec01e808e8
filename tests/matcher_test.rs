use tidal2deezer::matcher::{build_query, clean};

#[test]
fn test_clean_strips_punctuation_and_whitespace() {
    assert_eq!(clean("Hello, World!"), "HelloWorld");
    assert_eq!(clean("AC/DC"), "ACDC");
    assert_eq!(clean("  spaced   out  "), "spacedout");
    assert_eq!(clean("(Don't) Stop - Me. Now?"), "DontStopMeNow");
}

#[test]
fn test_clean_keeps_unicode_letters_and_digits() {
    // Accented letters are letters and stay; punctuation and dashes go.
    assert_eq!(clean("Café Déjà-Vu!"), "CaféDéjàVu");
    assert_eq!(clean("Sigur Rós"), "SigurRós");
    assert_eq!(clean("BTS (방탄소년단)"), "BTS방탄소년단");
    assert_eq!(clean("24K Magic"), "24KMagic");
}

#[test]
fn test_clean_output_is_alphanumeric_only() {
    let inputs = [
        "Café Déjà-Vu!",
        "★☆ Best Of ☆★",
        "...",
        "Песня №5",
        "emoji 🎵 title",
        "",
    ];

    for input in inputs {
        let cleaned = clean(input);
        assert!(
            cleaned.chars().all(char::is_alphanumeric),
            "clean({input:?}) produced non-alphanumeric output {cleaned:?}"
        );
    }
}

#[test]
fn test_clean_is_idempotent() {
    let inputs = ["Café Déjà-Vu!", "AC/DC", "plain", "", "12 34"];
    for input in inputs {
        let once = clean(input);
        assert_eq!(clean(&once), once);
    }
}

#[test]
fn test_build_query_joins_cleaned_name_and_artist() {
    assert_eq!(
        build_query("Song A", Some("Artist X")),
        "SongA ArtistX".to_string()
    );
    assert_eq!(build_query("Solo", None), "Solo".to_string());
}

#[test]
fn test_build_query_omits_empty_artist() {
    // An artist that cleans down to nothing must not leave a trailing space
    assert_eq!(build_query("Song A", Some("---")), "SongA".to_string());
    assert_eq!(build_query("Song A", Some("")), "SongA".to_string());
}

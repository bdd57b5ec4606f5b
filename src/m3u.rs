// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Reading and writing extended M3U playlist files.
//!
//! Playlists are stored as an `#EXTM3U` header followed by one `#EXTINF:,`
//! line and one path per track. Paths are relative to the directory holding
//! the playlist, so every track must live somewhere beneath it.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub(crate) const M3U_HEADER: &str = "#EXTM3U";

const M3U_ENTRY: &str = "#EXTINF:,";

pub(crate) const M3U_EXTENSION: &str = "m3u";

#[derive(Debug, Error)]
pub(crate) enum M3uError {
    #[error("failed to access playlist {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{track} is not inside the playlist directory {base}")]
    OutsideBase { track: PathBuf, base: PathBuf },

    #[error("{track} cannot be written to a playlist, its path is not valid UTF-8")]
    NotUtf8 { track: PathBuf },
}

/// Reads the track paths of a playlist, resolved against `base`.
///
/// A file without the `#EXTM3U` header holds no tracks.
pub(crate) fn read_playlist(list_path: &Path, base: &Path) -> Result<Vec<PathBuf>, M3uError> {
    let contents = fs::read_to_string(list_path).map_err(|source| M3uError::Io {
        path: list_path.to_path_buf(),
        source,
    })?;

    Ok(parse_playlist(&contents, base))
}

pub(crate) fn parse_playlist(contents: &str, base: &Path) -> Vec<PathBuf> {
    let mut lines = contents.lines().map(|line| line.trim_end_matches('\r'));

    // Tolerate a UTF-8 byte order mark ahead of the header
    match lines.next() {
        Some(header) if header.trim_start_matches('\u{feff}') == M3U_HEADER => {}
        _ => return vec![],
    }

    lines
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|line| base.join(line))
        .collect()
}

/// Writes `tracks` to the playlist, replacing its contents.
pub(crate) fn write_playlist(list_path: &Path, base: &Path, tracks: &[PathBuf]) -> Result<(), M3uError> {
    let contents = render_playlist(base, tracks)?;

    fs::write(list_path, contents).map_err(|source| M3uError::Io {
        path: list_path.to_path_buf(),
        source,
    })
}

/// Creates a playlist holding no tracks.
pub(crate) fn create_playlist(list_path: &Path) -> Result<(), M3uError> {
    fs::write(list_path, format!("{M3U_HEADER}\n")).map_err(|source| M3uError::Io {
        path: list_path.to_path_buf(),
        source,
    })
}

pub(crate) fn render_playlist(base: &Path, tracks: &[PathBuf]) -> Result<String, M3uError> {
    let mut contents = format!("{M3U_HEADER}\n");

    for track in tracks {
        let relative = relative_path(track, base)?;
        let Some(relative) = relative.to_str() else {
            return Err(M3uError::NotUtf8 { track: track.to_path_buf() });
        };
        contents.push_str(M3U_ENTRY);
        contents.push('\n');
        contents.push_str(relative);
        contents.push('\n');
    }

    Ok(contents)
}

/// Expresses `track` relative to `base`.
pub(crate) fn relative_path(track: &Path, base: &Path) -> Result<PathBuf, M3uError> {
    match track.strip_prefix(base) {
        Ok(relative) if !relative.as_os_str().is_empty() => Ok(relative.to_path_buf()),
        _ => Err(M3uError::OutsideBase {
            track: track.to_path_buf(),
            base: base.to_path_buf(),
        }),
    }
}

pub(crate) fn is_playlist(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(M3U_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tracks_relative_to_base() {
        let contents = "#EXTM3U\n#EXTINF:,\nrock/one.mp3\n#EXTINF:,\ntwo.flac\n";

        let tracks = parse_playlist(contents, Path::new("/music"));

        assert_eq!(
            tracks,
            vec![PathBuf::from("/music/rock/one.mp3"), PathBuf::from("/music/two.flac")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn refuses_to_write_paths_that_are_not_utf8() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("mix.m3u");
        fs::write(&list_path, "#EXTM3U\n#EXTINF:,\nkeep.mp3\n").unwrap();
        let bad = dir.path().join(OsStr::from_bytes(b"bad\xff.mp3"));

        let result = write_playlist(&list_path, dir.path(), &[dir.path().join("good.mp3"), bad.clone()]);

        assert!(matches!(result, Err(M3uError::NotUtf8 { track }) if track == bad));
        assert_eq!(fs::read_to_string(&list_path).unwrap(), "#EXTM3U\n#EXTINF:,\nkeep.mp3\n");
    }

    #[test]
    fn missing_header_means_no_tracks() {
        assert!(parse_playlist("one.mp3\ntwo.mp3\n", Path::new("/music")).is_empty());
        assert!(parse_playlist("", Path::new("/music")).is_empty());
    }

    #[test]
    fn tolerates_crlf_blank_lines_and_plain_entries() {
        let contents = "#EXTM3U\r\n#EXTINF:123,Artist - Title\r\none.mp3\r\n\r\ntwo.mp3\r\n";

        let tracks = parse_playlist(contents, Path::new("/m"));

        assert_eq!(tracks, vec![PathBuf::from("/m/one.mp3"), PathBuf::from("/m/two.mp3")]);
    }

    #[test]
    fn renders_header_and_entry_lines() {
        let tracks = vec![PathBuf::from("/music/a/one.mp3"), PathBuf::from("/music/two.mp3")];

        let contents = render_playlist(Path::new("/music"), &tracks).unwrap();

        assert_eq!(contents, "#EXTM3U\n#EXTINF:,\na/one.mp3\n#EXTINF:,\ntwo.mp3\n");
    }

    #[test]
    fn rejects_tracks_outside_the_playlist_directory() {
        let tracks = vec![PathBuf::from("/elsewhere/one.mp3")];

        let err = render_playlist(Path::new("/music"), &tracks).unwrap_err();

        assert!(matches!(err, M3uError::OutsideBase { .. }));
    }

    #[test]
    fn relative_path_rejects_the_base_itself() {
        assert!(relative_path(Path::new("/music"), Path::new("/music")).is_err());
        assert_eq!(
            relative_path(Path::new("/music/x/y.mp3"), Path::new("/music")).unwrap(),
            PathBuf::from("x/y.mp3")
        );
    }

    #[test]
    fn written_playlists_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("mix.m3u");
        let tracks = vec![dir.path().join("one.mp3"), dir.path().join("sub").join("two.mp3")];

        write_playlist(&list_path, dir.path(), &tracks).unwrap();

        assert_eq!(read_playlist(&list_path, dir.path()).unwrap(), tracks);
    }

    #[test]
    fn created_playlist_is_empty_but_valid() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("new.m3u");

        create_playlist(&list_path).unwrap();

        assert_eq!(fs::read_to_string(&list_path).unwrap(), "#EXTM3U\n");
        assert!(read_playlist(&list_path, dir.path()).unwrap().is_empty());
    }

    #[test]
    fn reading_missing_file_reports_the_path() {
        let err = read_playlist(Path::new("/no/such/list.m3u"), Path::new("/no")).unwrap_err();

        assert!(err.to_string().contains("/no/such/list.m3u"));
    }

    #[test]
    fn recognises_playlist_extension() {
        assert!(is_playlist(Path::new("a/b.m3u")));
        assert!(is_playlist(Path::new("a/b.M3U")));
        assert!(!is_playlist(Path::new("a/b.mp3")));
        assert!(!is_playlist(Path::new("a/m3u")));
    }
}

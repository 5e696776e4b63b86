//! One-shot command handlers: request/response glue plus stdout printing.

use anyhow::Result;

use crate::config::Config;
use crate::server_api;
use crate::song::Song;
use crate::store::Store;

fn print_song(song: &Song, id: Option<usize>) {
    match id {
        Some(id) => println!("  {id}: {song}"),
        None => println!("{song}"),
    }
}

/// Print the queue, nearest-to-playing last, indices descending to 0.
pub(crate) fn show_queue(cfg: &Config) -> Result<()> {
    let queue = server_api::queue_list(cfg)?;
    println!("Queue:");
    let mut id = queue.len();
    for song in queue.iter().rev() {
        id -= 1;
        print_song(song, Some(id));
    }
    Ok(())
}

/// Search all backends, print the hits with a running index across backends,
/// and cache the flat list for a later `add`.
pub(crate) fn search(cfg: &Config, store: &Store, terms: &str) -> Result<()> {
    let backends = server_api::search(cfg, terms)?;
    let mut results = Vec::new();
    for (name, backend) in backends {
        println!("{name}:");
        for song in backend.songs {
            print_song(&song, Some(results.len()));
            results.push(song);
        }
    }
    store.save_results(&results)?;
    Ok(())
}

/// Enqueue one cached result by id, or every cached result without an id.
pub(crate) fn add(cfg: &Config, store: &Store, id: Option<usize>) -> Result<()> {
    let Some(results) = store.load_results()? else {
        println!("no search results");
        return Ok(());
    };
    match id {
        Some(id) => {
            let Some(song) = results.get(id) else {
                println!("no result with id {id}");
                return Ok(());
            };
            server_api::enqueue(cfg, song)?;
            println!("song queued: {song}");
        }
        None => {
            for song in &results {
                server_api::enqueue(cfg, song)?;
            }
            println!("queued {} songs", results.len());
        }
    }
    Ok(())
}

pub(crate) fn delete(cfg: &Config, id: usize) -> Result<()> {
    let removed = server_api::queue_delete(cfg, id)?;
    if let Some(song) = removed.first() {
        print_song(song, None);
    }
    Ok(())
}

pub(crate) fn skip(cfg: &Config, count: i64) -> Result<()> {
    let reply = server_api::skip(cfg, count)?;
    println!("{reply}");
    Ok(())
}

/// List playlist files, or print one playlist's songs (and cache them so
/// `add` works against a playlist too).
pub(crate) fn playlists(store: &Store, id: Option<usize>) -> Result<()> {
    let names = store.list_playlists()?;
    match id {
        None => {
            for (id, name) in names.iter().enumerate() {
                println!("  {id}: {name}");
            }
        }
        Some(id) => {
            let Some(name) = names.get(id) else {
                println!("no playlist with id {id}");
                return Ok(());
            };
            let mut songs = store.load_playlist(name)?;
            songs.reverse();
            for (id, song) in songs.iter().enumerate() {
                print_song(song, Some(id));
            }
            store.save_results(&songs)?;
        }
    }
    Ok(())
}

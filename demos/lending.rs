//! A small lending library: a fixed stock of books shared by many readers

use bounded_pool::BoundedPool;
use std::thread;
use std::time::Duration;

struct Book {
    title: &'static str,
    author: &'static str,
}

fn main() {
    println!("=== bounded-pool - Lending Library ===\n");

    let stock = vec![
        Book { title: "The Art of Computer Programming", author: "Knuth" },
        Book { title: "Structure and Interpretation of Computer Programs", author: "Abelson" },
        Book { title: "The C Programming Language", author: "Kernighan" },
    ];

    let library = BoundedPool::new(stock).expect("non-empty stock");

    let mut readers = vec![];
    for reader in 1..=6 {
        let library = library.clone();
        readers.push(thread::spawn(move || {
            // Waits whenever every copy is checked out
            let book = library.acquire();
            println!("Reader {} borrowed \"{}\" by {}", reader, book.title, book.author);
            thread::sleep(Duration::from_millis(40));
            println!("Reader {} returned \"{}\"", reader, book.title);
        }));
    }

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }

    println!("\nAll {} books back on the shelf", library.available());
}

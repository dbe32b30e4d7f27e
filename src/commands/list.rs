//! List posts

use anyhow::Result;

use crate::content::PostSummary;
use crate::generator::Generator;
use crate::prismic::public_cursor;
use crate::Blog;

/// Print the first page of posts, or every page when `all` is set
pub async fn run(blog: &Blog, all: bool) -> Result<()> {
    let generator = Generator::new(&blog.config)?;
    let first = blog.load_initial().await?;

    println!("Posts (page 1):");
    print_posts(&generator, &first.results);

    let mut accumulator = blog.accumulator(first.next_page);
    if all {
        let loaded = accumulator.load_all(&blog.client).await?;
        if loaded > 0 {
            println!("Posts (following pages):");
            print_posts(&generator, accumulator.posts());
        }
        println!("Total: {}", first.results.len() + loaded);
    } else if let Some(cursor) = accumulator.cursor() {
        println!("More posts available: {}", public_cursor(cursor));
    }

    Ok(())
}

fn print_posts(generator: &Generator, posts: &[PostSummary]) {
    for post in posts {
        let card = generator.post_card(post);
        println!("  {} - {} by {} [{}]", card.date, card.title, card.author, card.href);
    }
}

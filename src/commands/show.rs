//! Show a single post

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Print one post's metadata and the text of its first content section
pub async fn run(blog: &Blog, uid: &str) -> Result<()> {
    let generator = Generator::new(&blog.config)?;
    let post = blog.fetch_detail(uid).await?;
    let view = generator.post_view(&post);

    println!("{}", view.title);
    println!("{} | {} | {} min", view.date, view.author, view.reading_time);
    if let Some(edited) = &view.edited {
        println!("* editado em {}, às {}", edited.date, edited.time);
    }
    if let Some(banner) = &view.banner_url {
        println!("Banner: {}", banner);
    }
    println!();
    println!("{}", post.content.heading);
    println!("{}", post.content.body_text);

    Ok(())
}

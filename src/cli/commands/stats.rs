//! Collection stats command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let (dramas, genres, parts) = tokio::try_join!(
        store.count_dramas(),
        store.count_genres(),
        store.count_parts()
    )?;

    let (trending, titles, all_parts) = tokio::try_join!(
        store.list_trending_dramas(None),
        store.drama_titles(),
        store.list_parts()
    )?;
    let orphaned = all_parts
        .iter()
        .filter(|part| !titles.contains_key(&part.drama_id))
        .count();

    println!("Catalog ({})", config.general.database_path);
    println!("{:-<50}", "");
    println!("Dramas:   {dramas} ({} trending)", trending.len());
    println!("Genres:   {genres}");
    println!("Parts:    {parts} ({orphaned} without a drama)");

    if dramas == 0 {
        println!();
        println!("The catalog is empty. Sign in at /login and add dramas from /admin.");
    }

    Ok(())
}

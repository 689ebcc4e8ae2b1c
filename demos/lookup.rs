use onthepixel_stats::{format, ClientConfig, LookupState, StatsClient, StatsLookupController};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> onthepixel_stats::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input = std::env::args().nth(1).unwrap_or_else(|| "/stats/Notch".to_string());
    let username = format::username_from_path(&input).unwrap_or(&input);

    let client = StatsClient::with_config(ClientConfig::from_env())?;
    let controller = StatsLookupController::new(client);
    controller.submit(username).await?;

    match controller.state() {
        LookupState::Success { stats } => {
            let identity = &stats.identity;
            println!("{} [{}] ({})", identity.username, identity.rank.label, identity.rank.color);
            println!("  first joined: {}", format::long_date(&identity.first_seen));
            println!("  last online:  {}", format::long_date(&identity.last_seen));
            println!("  playtime:     {}", stats.playtime.pretty());
            println!(
                "  balance:      {} pixels, {} shards",
                stats.balance.pixels, stats.balance.shards
            );
            println!(
                "  bedwars:      {:.1}% wins, {:.2} kdr",
                stats.bedwars.win_rate_percent(),
                stats.bedwars.kdr()
            );
            println!("  avatar:       {}", identity.avatar_url(400));
            println!("{}", serde_json::to_string_pretty(&stats).unwrap_or_default());
        }
        LookupState::Error { error } => eprintln!("{}", error.user_message()),
        state => eprintln!("unexpected state: {state:?}"),
    }
    Ok(())
}

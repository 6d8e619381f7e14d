use std::error::Error as StdError;
use std::fmt::Display;

use clap::{Arg, ArgMatches, Command};
use log::debug;

use bubbletime::auth::AuthContext;
use bubbletime::catalog::MenuItem;
use bubbletime::config::StorefrontConfig;
use bubbletime::pages::favorites::FavoriteCard;
use bubbletime::pages::navbar::Navbar;
use bubbletime::pages::{favorites, home, leaderboard, menu, price_label, ViewState};
use bubbletime::BubbleTime;

const TOKEN_ENV: &str = "BUBBLETIME_ACCESS_TOKEN";

type CliResult = Result<(), Box<dyn StdError>>;

fn cli() -> Command<'static> {
    let credentials = [
        Arg::new("email").help("Account email").required(true).index(1),
        Arg::new("password").help("Account password").required(true).index(2),
    ];
    let item = Arg::new("item").help("Menu item ID").required(true).index(1);

    Command::new("bubbletime")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse the Bubble Time menu and manage favorites")
        .subcommand_required(true)
        .arg(
            Arg::new("token")
                .long("token")
                .value_name("JWT")
                .takes_value(true)
                .global(true)
                .help("Access token from sign-in (defaults to $BUBBLETIME_ACCESS_TOKEN)"),
        )
        .subcommand(Command::new("home").about("Show the welcome page"))
        .subcommand(
            Command::new("menu")
                .about("Show the menu by category")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_name("ID")
                        .takes_value(true)
                        .help("Only items in this category"),
                )
                .arg(
                    Arg::new("search")
                        .long("search")
                        .value_name("TEXT")
                        .takes_value(true)
                        .conflicts_with("category")
                        .help("Only items whose name contains TEXT"),
                ),
        )
        .subcommand(Command::new("favorites").about("Show the top food and drinks"))
        .subcommand(Command::new("leaderboard").about("Show the ten most favorited items"))
        .subcommand(Command::new("sign-up").about("Create an account").args(credentials.clone()))
        .subcommand(Command::new("sign-in").about("Sign in and print an access token").args(credentials))
        .subcommand(Command::new("sign-out").about("Invalidate the access token"))
        .subcommand(
            Command::new("refresh")
                .about("Exchange a refresh token for a new access token")
                .arg(Arg::new("refresh-token").help("Refresh token from sign-in").required(true).index(1)),
        )
        .subcommand(Command::new("favorite").about("Favorite a menu item").arg(item.clone()))
        .subcommand(Command::new("unfavorite").about("Remove a favorite").arg(item))
        .subcommand(Command::new("mine").about("List your favorites"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
}

fn context(matches: &ArgMatches) -> Result<AuthContext, Box<dyn StdError>> {
    let token = matches
        .value_of("token")
        .map(str::to_string)
        .or_else(|| std::env::var(TOKEN_ENV).ok());
    Ok(AuthContext::from_token(token.as_deref())?)
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Box<dyn StdError>> {
    matches
        .value_of(name)
        .ok_or_else(|| format!("missing <{}>", name).into())
}

fn print_navbar(ctx: &AuthContext) {
    let navbar = Navbar::for_context(ctx);
    let links: Vec<&str> = navbar.links.iter().map(|l| l.label.as_str()).collect();
    println!("{} | {} | {}", navbar.brand, links.join(" | "), navbar.account.label);
    println!();
}

/// Print a view, or its message when there is nothing to show
fn render<T>(state: ViewState<T>, show: impl FnOnce(T)) {
    match state {
        ViewState::Loading => println!("Loading..."),
        ViewState::Failed(message) => eprintln!("{}", message),
        ViewState::Empty(message) => println!("{}", message),
        ViewState::Ready(value) => show(value),
    }
}

fn print_items(items: &[MenuItem]) {
    if items.is_empty() {
        println!("No matching items");
    }
    for item in items {
        println!("  {:<30} {:>10}  [{}]", item.name, price_label(item.price), item.id);
    }
}

fn print_card(card: &FavoriteCard, extra: impl Display) {
    println!(
        "  #{:<2} {:<30} {:>10}  {} favorite(s){}",
        card.rank, card.name, card.price_label, card.favorite_count, extra
    );
}

async fn run(matches: ArgMatches) -> CliResult {
    let config = StorefrontConfig::from_env()?;
    let shop = BubbleTime::from_config(&config);
    let ctx = context(&matches)?;
    debug!("Using {} as {:?}", shop.url, ctx.email());

    let storage = shop.storage();
    let images = storage.from(shop.image_bucket());
    let catalog = shop.catalog();
    let auth = shop.auth();

    match matches.subcommand() {
        Some(("home", _)) => {
            print_navbar(&ctx);
            let page = home::page();
            println!("{}\n{}\n", page.title, page.tagline);
            for section in page.sections {
                println!("{}\n  {}\n", section.heading, section.body);
            }
        }
        Some(("menu", sub)) => {
            print_navbar(&ctx);
            if let Some(category) = sub.value_of("category") {
                print_items(&catalog.menu_items_in(category).await?);
            } else if let Some(text) = sub.value_of("search") {
                print_items(&catalog.search_menu(text).await?);
            } else {
                render(menu::load(&catalog, &images).await, |page| {
                    for section in page.sections {
                        println!("{}", section.category);
                        for card in section.items {
                            println!("  {:<30} {:>10}  [{}]", card.name, card.price_label, card.id);
                        }
                        println!();
                    }
                });
            }
        }
        Some(("favorites", _)) => {
            print_navbar(&ctx);
            render(favorites::load(&catalog, &images).await, |page| {
                println!("Top 5 Favorite Foods");
                page.food.iter().for_each(|card| print_card(card, ""));
                println!("\nTop 5 Favorite Drinks");
                page.drinks.iter().for_each(|card| print_card(card, ""));
            });
        }
        Some(("leaderboard", _)) => {
            print_navbar(&ctx);
            render(leaderboard::load(&catalog, &images).await, |rows| {
                println!("Favorites Leaderboard");
                for row in rows {
                    print_card(&row.card, format!("  ({})", row.category_name));
                }
            });
        }
        Some(("sign-up", sub)) => {
            let email = arg(sub, "email")?;
            let response = auth.sign_up(email, arg(sub, "password")?).await?;
            match response.access_token {
                Some(token) => println!("{}", token),
                None => println!("Check {} for a confirmation link", email),
            }
        }
        Some(("sign-in", sub)) => {
            let signed_in = auth.sign_in(arg(sub, "email")?, arg(sub, "password")?).await?;
            let session = signed_in.require()?;
            println!("{}", session.access_token);
            if let Some(refresh_token) = &session.refresh_token {
                println!("{}", refresh_token);
            }
        }
        Some(("sign-out", _)) => {
            auth.sign_out(&ctx).await?;
            println!("Signed out");
        }
        Some(("refresh", sub)) => {
            let refreshed = auth.refresh_token(arg(sub, "refresh-token")?).await?;
            println!("{}", refreshed.require()?.access_token);
        }
        Some(("favorite", sub)) => {
            let item = arg(sub, "item")?;
            let menu_item = catalog
                .menu_item(item)
                .await?
                .ok_or_else(|| format!("No menu item {}", item))?;
            if catalog.is_favorite(&ctx, item).await? {
                println!("{} is already a favorite", menu_item.name);
            } else if catalog.add_favorite(&ctx, item).await? {
                println!("Added {} to favorites", menu_item.name);
            } else {
                println!("{} is already a favorite", menu_item.name);
            }
        }
        Some(("unfavorite", sub)) => {
            let item = arg(sub, "item")?;
            catalog.remove_favorite(&ctx, item).await?;
            println!("Removed {} from favorites", item);
        }
        Some(("mine", _)) => {
            let session = ctx.require()?;
            let records = catalog.favorites_of(&session.user_id).await?;
            let items: Vec<MenuItem> = records.into_iter().filter_map(|r| r.menu_item).collect();
            print_items(&items);
        }
        Some(("whoami", _)) => {
            let user = auth.get_user(&ctx).await?;
            println!("{} ({})", user.email.unwrap_or_default(), user.id);
        }
        Some((other, _)) => return Err(format!("unknown command {}", other).into()),
        None => return Err("no command given".into()),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> CliResult {
    dotenv::dotenv().ok();
    env_logger::init();

    run(cli().get_matches()).await
}

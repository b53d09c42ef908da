use std::env;

use dotenvy::dotenv;

use activities_client::{
    ActivityForm, ActivityStore, ClientConfig, FormField, HttpGateway, LoginCredentials,
    StoreEvent, UserStore,
};

#[tokio::main]
async fn main() {
    // Laad .env bestand
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env();
    println!("Verbinden met API: {}", config.base_url);

    let gateway = HttpGateway::new(&config);
    let mut user_store = UserStore::new(gateway.clone());
    let mut activity_store = ActivityStore::new(gateway.clone());

    // 2. Inloggen met demo credentials
    let credentials = LoginCredentials {
        email: env::var("DEMO_EMAIL").unwrap_or_else(|_| "bob@test.com".to_string()),
        password: env::var("DEMO_PASSWORD").unwrap_or_else(|_| "Pa$$w0rd".to_string()),
    };

    let user = match user_store.login(&credentials).await {
        Ok(user) => user,
        Err(e) => {
            eprintln!("❌ Login mislukt: {}", e);
            std::process::exit(1);
        }
    };
    println!("✅ Ingelogd als {}", user.display_name);
    activity_store.set_current_user(Some(user));

    // 3. De console is de view layer: render opnieuw op store events.
    let mut subscription = activity_store.subscribe();

    if let Err(e) = activity_store.load_activities().await {
        eprintln!("❌ Kan activiteiten niet laden: {}", e);
        std::process::exit(1);
    }

    while let Some(event) = subscription.try_next() {
        if let StoreEvent::ActivityUpserted(id) = event {
            tracing::debug!("activity upserted: {}", id);
        }
    }

    println!("📅 {} activiteiten geladen", activity_store.len());
    for (date, activities) in activity_store.grouped_by_date() {
        println!("── {}", date);
        for activity in activities {
            let marker = if activity.is_cancelled {
                "🚫"
            } else if activity.is_host {
                "👑"
            } else if activity.is_going {
                "✅"
            } else {
                "  "
            };
            println!("{} {} — {} ({})", marker, activity.title, activity.venue, activity.city);
        }
    }

    // Optioneel: maak een demo-activiteit aan via het formulier
    if env::var("DEMO_CREATE").is_ok() {
        let mut form = ActivityForm::new();
        form.open(None);
        form.set(FormField::Title, "Run club");
        form.set(FormField::Description, "5k");
        form.set(FormField::Category, "culture");
        form.set(FormField::Date, "2025-01-01T18:00");
        form.set(FormField::Venue, "Park");
        form.set(FormField::City, "Springfield");

        match form.submit(&mut activity_store).await {
            Ok(id) => println!("✅ Activiteit aangemaakt: /activities/{}", id),
            Err(e) => eprintln!("❌ Aanmaken mislukt: {}", e),
        }
    }
}

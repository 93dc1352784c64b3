//! Last Bite CLI - command line interface for administrative tasks.
//!
//! Usage: `lastbite [--endpoint URL] [--secret KEY] <command>`

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};

/// Admin CLI for the Last Bite marketplace
#[derive(Parser, Debug)]
#[command(name = "lastbite")]
#[command(about = "Admin CLI for the Last Bite marketplace backend")]
struct Args {
    /// API endpoint URL
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    endpoint: String,

    /// Admin shared secret (or set LASTBITE_ADMIN_SECRET)
    #[arg(short, long, env = "LASTBITE_ADMIN_SECRET")]
    secret: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all users
    Users,
    /// List all food listings
    Foods,
    /// List all purchases
    Purchases,
    /// Show system statistics
    Stats,
    /// Add a new user
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_enum, default_value = "customer")]
        role: Role,
    },
    /// Delete a food listing
    DeleteFood {
        /// Id of the listing to delete
        id: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Role {
    #[value(name = "customer")]
    Customer,
    #[value(name = "store_owner")]
    StoreOwner,
    #[value(name = "admin")]
    Admin,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::StoreOwner => "store_owner",
            Role::Admin => "admin",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = Client::new(&args.endpoint, &args.secret);

    match args.command {
        Command::Users => print_users(&client.fetch("users").await?),
        Command::Foods => print_foods(&client.fetch("foods").await?),
        Command::Purchases => print_purchases(&client.fetch("purchases").await?),
        Command::Stats => print_stats(&client.fetch("stats").await?),
        Command::AddUser { name, email, role } => {
            let user = client
                .create_user(json!({"name": name, "email": email, "role": role.as_str()}))
                .await?;
            println!(
                "User '{}' added with id {}",
                user["name"].as_str().unwrap_or("-"),
                user["id"]
            );
        }
        Command::DeleteFood { id } => {
            client.delete_food(id).await?;
            println!("Food listing {} deleted", id);
        }
    }
    Ok(())
}

struct Client {
    http: reqwest::Client,
    endpoint: String,
    secret: String,
}

impl Client {
    fn new(endpoint: &str, secret: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            secret: secret.to_string(),
        }
    }

    /// Fetch `data` from an admin endpoint, failing on non-2xx statuses.
    async fn fetch(&self, resource: &str) -> Result<Value> {
        let url = format!("{}/api/admin/{}", self.endpoint, resource);
        let response = self
            .http
            .get(&url)
            .header("x-admin-secret", &self.secret)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        Self::unwrap_data(response).await
    }

    /// Create a user through the public API.
    async fn create_user(&self, payload: Value) -> Result<Value> {
        let url = format!("{}/api/users", self.endpoint);
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        Self::unwrap_data(response).await
    }

    /// Delete a listing through the admin API (cascades its purchases).
    async fn delete_food(&self, id: u64) -> Result<Value> {
        let url = format!("{}/api/admin/foods/{}", self.endpoint, id);
        let response = self
            .http
            .delete(&url)
            .header("x-admin-secret", &self.secret)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        Self::unwrap_data(response).await
    }

    async fn unwrap_data(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body: Value = response.json().await.context("invalid JSON response")?;
        if !status.is_success() {
            let message = body["message"].as_str().unwrap_or("unknown error");
            bail!("server returned {}: {}", status, message);
        }
        Ok(body["data"].clone())
    }
}

fn rows(data: &Value) -> &[Value] {
    data.as_array().map(Vec::as_slice).unwrap_or(&[])
}

fn print_users(data: &Value) {
    let users = rows(data);
    if users.is_empty() {
        println!("No users found");
        return;
    }
    println!("{:<6} {:<22} {:<32} {:<12}", "ID", "Name", "Email", "Role");
    println!("{}", "-".repeat(74));
    for user in users {
        println!(
            "{:<6} {:<22} {:<32} {:<12}",
            user["id"],
            user["name"].as_str().unwrap_or("-"),
            user["email"].as_str().unwrap_or("-"),
            user["role"].as_str().unwrap_or("-"),
        );
    }
}

fn print_foods(data: &Value) {
    let foods = rows(data);
    if foods.is_empty() {
        println!("No food listings found");
        return;
    }
    println!(
        "{:<6} {:<26} {:>8} {:>7} {:<12} {:<8}",
        "ID", "Name", "Price", "Stock", "Expiry", "Owner"
    );
    println!("{}", "-".repeat(72));
    for food in foods {
        println!(
            "{:<6} {:<26} {:>8.2} {:>7} {:<12} {:<8}",
            food["id"],
            food["name"].as_str().unwrap_or("-"),
            food["price"].as_f64().unwrap_or(0.0),
            food["stock"],
            food["expiry_date"].as_str().unwrap_or("no expiry"),
            food["user_id"],
        );
    }
}

fn print_purchases(data: &Value) {
    let purchases = rows(data);
    if purchases.is_empty() {
        println!("No purchases found");
        return;
    }
    println!(
        "{:<6} {:>5} {:<26} {:<8} {:<8}",
        "ID", "Qty", "Date", "Buyer", "Food"
    );
    println!("{}", "-".repeat(58));
    for purchase in purchases {
        let date = purchase["purchase_date"].as_str().unwrap_or("-");
        println!(
            "{:<6} {:>5} {:<26} {:<8} {:<8}",
            purchase["id"],
            purchase["quantity_bought"],
            &date[..date.len().min(19)],
            purchase["user_id"],
            purchase["food_id"],
        );
    }
}

fn print_stats(data: &Value) {
    println!("Users");
    println!("  total:        {}", data["users_total"]);
    println!("  customers:    {}", data["customers"]);
    println!("  store owners: {}", data["store_owners"]);
    println!("  admins:       {}", data["admins"]);
    println!("Foods");
    println!("  total:        {}", data["foods_total"]);
    println!("Purchases");
    println!("  total:        {}", data["purchases_total"]);
    println!("  last 7 days:  {}", data["purchases_recent_week"]);
}

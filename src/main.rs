//! IronVault 主入口
//! 命令行操作当前钱包（或 --wallet 指定的钱包）

use std::io::{self, BufRead};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use ironvault::{
    cli::{AccountView, Cli, Commands},
    config::Config,
    domain::Address,
    infrastructure::logging::{init_default_logging, init_logging},
    AppState, WalletError,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 环境变量 + 参数
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 2. 配置：--config 优先，其次 CONFIG_PATH
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("CONFIG_PATH").ok().map(Into::into));
    let config = Config::from_env_and_file(config_path.as_ref())?;
    config.validate()?;

    // 3. 日志（stderr，stdout 只留给命令输出）
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("failed to init logging: {}", e);
        init_default_logging();
    }

    // 4. 协作方
    let state = AppState::from_config(&config).context("failed to build application state")?;

    // 5. Ctrl-C 取消进行中的操作
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling");
                cancel.cancel();
            }
        });
    }

    if let Err(err) = run(cli, &state, &cancel).await {
        match err.downcast_ref::<WalletError>() {
            Some(wallet_err) => {
                tracing::error!(code = wallet_err.code(), error = %wallet_err, "command failed");
                eprintln!("error[{}]: {}", wallet_err.code(), wallet_err);
            }
            None => eprintln!("error: {:#}", err),
        }
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WalletView {
    id: String,
    accounts: Vec<AccountView>,
}

async fn run(cli: Cli, state: &AppState, cancel: &CancellationToken) -> Result<()> {
    match cli.command {
        Commands::Init => {
            let wallet = state.initialize_wallet().execute(cancel).await?;
            print_json(&WalletView {
                id: wallet.id().to_string(),
                accounts: wallet.accounts().iter().map(AccountView::from).collect(),
            })
        }
        Commands::Import { mnemonic } => {
            let mnemonic = match mnemonic {
                Some(m) => zeroize::Zeroizing::new(m),
                None => read_mnemonic_from_stdin()?,
            };
            let wallet = state.import_wallet().execute(&mnemonic, cancel).await?;
            // 导入用例本身不切换当前钱包
            state.current_wallet.set_current_wallet_id(wallet.id()).await?;
            print_json(&WalletView {
                id: wallet.id().to_string(),
                accounts: Vec::new(),
            })
        }
        Commands::CreateAccount { network, label } => {
            let wallet_id = resolve_wallet(cli.wallet, state).await?;
            let account = state
                .create_account()
                .execute(&wallet_id, label.as_deref(), network, cancel)
                .await?;
            print_json(&AccountView::from(&account))
        }
        Commands::Accounts => {
            let wallet_id = resolve_wallet(cli.wallet, state).await?;
            let accounts = state.get_accounts().execute(&wallet_id, cancel).await?;
            print_json(&accounts.iter().map(AccountView::from).collect::<Vec<_>>())
        }
        Commands::Send {
            from,
            to,
            amount,
            network,
        } => {
            let wallet_id = resolve_wallet(cli.wallet, state).await?;
            let from = Address::parse(&from, network)?;
            let to = Address::parse(&to, network)?;
            let tx = state
                .send_funds()
                .execute(&wallet_id, &from, &to, amount, network, cancel)
                .await?;
            print_json(&tx)
        }
        Commands::Refresh => {
            let wallet_id = resolve_wallet(cli.wallet, state).await?;
            let accounts = state.refresh_balances().execute(&wallet_id, cancel).await?;
            print_json(&accounts.iter().map(AccountView::from).collect::<Vec<_>>())
        }
        Commands::Backup => {
            let wallet_id = resolve_wallet(cli.wallet, state).await?;
            let phrase = state.get_seed_phrase().execute(&wallet_id, cancel).await?;
            println!("{}", phrase.as_str());
            Ok(())
        }
        Commands::Rename { address, label } => {
            let wallet_id = resolve_wallet(cli.wallet, state).await?;
            let account = state
                .rename_account()
                .execute(&wallet_id, &address, &label, cancel)
                .await?;
            print_json(&AccountView::from(&account))
        }
    }
}

/// --wallet 优先，否则取当前钱包
async fn resolve_wallet(explicit: Option<String>, state: &AppState) -> Result<String> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    state
        .current_wallet
        .current_wallet_id()
        .await?
        .ok_or_else(|| anyhow!("no current wallet, run `ironvault init` or `ironvault import` first"))
}

fn read_mnemonic_from_stdin() -> Result<zeroize::Zeroizing<String>> {
    let mut line = zeroize::Zeroizing::new(String::new());
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read mnemonic from stdin")?;
    Ok(line)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

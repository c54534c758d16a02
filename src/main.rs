use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pozole::prelude::*;
use prettytable::{Cell, Row, Table};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pozole")]
#[command(about = "A Rust-based rule-driven strategy backtester for daily price data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a backtest with optional parameter optimization
    Run {
        //path to csv data file with date,close columns
        #[arg(long)]
        data: Option<PathBuf>,

        //path to a json run configuration (overrides the flags below)
        #[arg(long)]
        config: Option<PathBuf>,

        //macd fast ema span
        #[arg(long, default_value = "12")]
        macd_fast: usize,

        //macd slow ema span
        #[arg(long, default_value = "26")]
        macd_slow: usize,

        //macd signal line ema span
        #[arg(long, default_value = "9")]
        macd_signal: usize,

        //rsi lookback window
        #[arg(long, default_value = "14")]
        rsi_window: usize,

        //rsi oversold threshold
        #[arg(long, default_value = "30")]
        oversold: f64,

        //rsi overbought threshold
        #[arg(long, default_value = "70")]
        overbought: f64,

        //fast trend moving average window
        #[arg(long, default_value = "50")]
        ma_fast: usize,

        //slow trend moving average window
        #[arg(long, default_value = "200")]
        ma_slow: usize,

        //rsi windows for the optimizer grid
        #[arg(long, value_delimiter = ',', default_value = "10,14,20")]
        grid_rsi_windows: Vec<usize>,

        //oversold thresholds for the optimizer grid
        #[arg(long, value_delimiter = ',', default_value = "25,30")]
        grid_oversold: Vec<f64>,

        //skip the parameter grid search
        #[arg(long)]
        no_optimize: bool,

        //output path for equity curve csv
        #[arg(long)]
        output_equity_csv: Option<PathBuf>,

        //output path for signals csv
        #[arg(long)]
        output_signals_csv: Option<PathBuf>,
    },

    //write a default run configuration to a json file
    InitConfig {
        //where to write the configuration
        #[arg(long, default_value = "pozole.json")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            macd_fast,
            macd_slow,
            macd_signal,
            rsi_window,
            oversold,
            overbought,
            ma_fast,
            ma_slow,
            grid_rsi_windows,
            grid_oversold,
            no_optimize,
            output_equity_csv,
            output_signals_csv,
        } => {
            //a config file takes precedence over the individual flags
            let mut run_config = match config {
                Some(path) => RunConfiguration::from_json_file(&path)
                    .context(format!("Failed to load config from {:?}", path))?,
                None => RunConfiguration {
                    data_path: PathBuf::new(),
                    macd: MacdParams {
                        fast: macd_fast,
                        slow: macd_slow,
                        signal_span: macd_signal,
                    },
                    rsi: RsiParams {
                        window: rsi_window,
                        oversold,
                        overbought,
                    },
                    trend: TrendParams {
                        fast_window: ma_fast,
                        slow_window: ma_slow,
                    },
                    grid: OptimizationGrid {
                        rsi_windows: grid_rsi_windows,
                        oversold_levels: grid_oversold,
                        overbought,
                    },
                    output_equity_csv,
                    output_signals_csv,
                },
            };

            if let Some(data_path) = data {
                run_config.data_path = data_path;
            }

            if run_config.data_path.as_os_str().is_empty() {
                anyhow::bail!("No data file given: pass --data or set data_path in the config");
            }

            run_backtest(&run_config, no_optimize)?;
        }
        Commands::InitConfig { path } => {
            RunConfiguration::default().to_json_file(&path)?;
            println!("Default configuration written to {:?}", path);
        }
    }

    Ok(())
}

fn run_backtest(config: &RunConfiguration, no_optimize: bool) -> Result<()> {
    println!("Pozole Strategy Backtester");
    println!("==========================\n");

    //load data
    println!("Loading data from {:?}...", config.data_path);
    let series = load_csv(&config.data_path)
        .context(format!("Failed to load data from {:?}", config.data_path))?;

    println!("Loaded {} bars", series.len());
    println!(
        "Date range: {} to {}\n",
        series.first().date,
        series.last().date
    );

    println!(
        "MACD: fast={}, slow={}, signal={}",
        config.macd.fast, config.macd.slow, config.macd.signal_span
    );
    println!(
        "RSI: window={}, oversold={}, overbought={}\n",
        config.rsi.window, config.rsi.oversold, config.rsi.overbought
    );

    //run backtest
    println!("Running backtest...\n");
    let engine = BacktestEngine::new(series, config.macd, config.rsi, config.trend);
    let mut result = engine.run()?;

    //display results
    println!("Backtest Results");
    println!("================\n");
    result.summary.pretty_print_table();

    //parameter optimization
    if !no_optimize {
        println!("\nParameter Optimization");
        println!("======================\n");

        match engine.optimize(&result, &config.grid) {
            Ok(optimization) => {
                print_optimization_table(&optimization);
                result.optimization = Some(optimization);
            }
            //the base results above are still valid when optimization fails
            Err(err) => println!("Optimization failed: {}", err),
        }
    }

    //save outputs if requested
    if let Some(equity_path) = &config.output_equity_csv {
        save_equity_csv(&result, equity_path)?;
        println!("\nEquity curve saved to {:?}", equity_path);
    }

    if let Some(signals_path) = &config.output_signals_csv {
        save_signals_csv(&result, signals_path)?;
        println!("Signals saved to {:?}", signals_path);
    }

    Ok(())
}

fn print_optimization_table(optimization: &OptimizationResult) {
    let mut table = Table::new();

    table.add_row(Row::new(vec![
        Cell::new("RSI Window"),
        Cell::new("Oversold"),
        Cell::new("Sharpe"),
        Cell::new("Observations"),
    ]));

    for score in &optimization.scores {
        let sharpe = score
            .sharpe
            .map(|s| format!("{:.3}", s))
            .unwrap_or_else(|| "undefined".to_string());

        table.add_row(Row::new(vec![
            Cell::new(&format!("{}", score.candidate.rsi_window)),
            Cell::new(&format!("{}", score.candidate.oversold)),
            Cell::new(&sharpe),
            Cell::new(&format!("{}", score.num_observations)),
        ]));
    }

    table.printstd();

    println!(
        "\nBest parameters: RSI window {}, threshold {} -> Sharpe {:.3}",
        optimization.best.rsi_window, optimization.best.oversold, optimization.best_sharpe
    );
}

//undefined entries are written as empty fields, resolved only at this boundary
fn save_equity_csv(result: &BacktestResult, path: &PathBuf) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(
        file,
        "date,close,strategy_return,strategy_equity,buy_hold_equity"
    )?;

    for i in 0..result.dates.len() {
        writeln!(
            file,
            "{},{},{},{},{}",
            result.dates[i],
            result.closes[i],
            fmt_opt(result.strategy_returns[i]),
            fmt_opt(result.strategy_equity[i]),
            fmt_opt(result.buy_hold_equity[i]),
        )?;
    }

    Ok(())
}

fn save_signals_csv(result: &BacktestResult, path: &PathBuf) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "date,close,macd,signal,rsi,buy,sell,position")?;

    for i in 0..result.dates.len() {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{}",
            result.dates[i],
            result.closes[i],
            result.macd.macd_line[i],
            result.macd.signal_line[i],
            fmt_opt(result.rsi[i]),
            result.signals.buy[i],
            result.signals.sell[i],
            if result.positions[i].is_long() { 1 } else { 0 },
        )?;
    }

    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

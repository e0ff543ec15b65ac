// Copyright Kyler Chin <kyler@catenarymaps.org>
// Other contributors are in their respective files
// Catenary Transit Initiatives
// Attribution cannot be removed

#![deny(
    clippy::mutable_key_type,
    clippy::map_entry,
    clippy::boxed_local,
    clippy::let_unit_value,
    clippy::redundant_allocation,
    clippy::bool_comparison,
    clippy::bind_instead_of_map,
    clippy::vec_box,
    clippy::while_let_loop,
    clippy::useless_asref,
    clippy::repeat_once,
    clippy::deref_addrof,
    clippy::suspicious_map,
    clippy::arc_with_non_send_sync,
    clippy::single_char_pattern,
    clippy::for_kv_map,
    clippy::let_unit_value,
    clippy::let_and_return,
    clippy::iter_nth,
    clippy::iter_cloned_collect,
    clippy::bytes_nth,
    clippy::deprecated_clippy_cfg_attr,
    clippy::match_result_ok,
    clippy::cmp_owned,
    clippy::cmp_null,
    clippy::op_ref,
    clippy::useless_vec
)]

mod config;
mod map_places;

use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpResponse, HttpServer, Responder, middleware, web};
use anyhow::Context;
use clap::Parser;
use config::Args;
use placemap::MapService;
use placemap::place_store::{AnyPlaceStore, InMemoryPlaceStore, PostgresPlaceStore};
use placemap::postgres_tools::make_async_pool;
use placemap::result_cache::MapResultCache;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

async fn index() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Content-Type", "text/plain"))
        .body("Hello World from the placemap HTTP endpoint!")
}

async fn robots() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Content-Type", "text/plain"))
        .insert_header(("Cache-Control", "no-cache"))
        .body("User-agent: *\nDisallow: /places\nDisallow: /categories")
}

async fn open_store(args: &Args) -> anyhow::Result<AnyPlaceStore> {
    if let Some(path) = &args.places_csv {
        let store = InMemoryPlaceStore::from_csv_path(path)?;
        info!("Loaded {} places from {}", store.len(), path.display());
        return Ok(AnyPlaceStore::InMemory(store));
    }

    let database_url = args
        .database_url
        .as_deref()
        .context("either --places-csv or DATABASE_URL must be set")?;

    let pool = make_async_pool(database_url, args.db_pool_size)
        .await
        .map_err(|e| anyhow::anyhow!("could not build postgres pool: {}", e))?;

    info!("Connected place store to postgres");

    let store = PostgresPlaceStore::new(Arc::new(pool));
    Ok(AnyPlaceStore::Postgres(store))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let store = open_store(&args).await?;

    let ttl = args.cache_ttl();
    let cache = if args.no_cache {
        None
    } else {
        Some(MapResultCache::new(ttl, args.cache_max_entries))
    };

    let map_service = web::Data::new(MapService::new(store, cache));

    info!(
        "Serving map places on {}:{} with {} workers",
        args.bind_address, args.port, args.workers
    );

    HttpServer::new(move || {
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Server", "placemap")),
            )
            .wrap(middleware::Compress::default())
            .app_data(map_service.clone())
            .route("/", web::get().to(index))
            .route("/robots.txt", web::get().to(robots))
            .service(map_places::map_places)
            .service(map_places::categories)
    })
    .workers(args.workers)
    .bind((args.bind_address.as_str(), args.port))?
    .run()
    .await?;

    Ok(())
}

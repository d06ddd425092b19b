//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use actix_cors::Cors;
use actix_web::{guard, middleware, web, App, HttpResponse, HttpServer, Result};
use log::{error, info};
use serde_json::json;
use std::str::FromStr;
use t_relief_core::core::config::ApplicationCfg;
use t_relief_core::core::error::TileError;
use t_relief_core::mvt::tile::tile_headers;
use t_relief_core::service::tile_service::{HttpTileService, TileKind};

fn bad_request(err: TileError) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
}

async fn tile_mvt(
    service: web::Data<HttpTileService>,
    params: web::Path<(String, String, String, String)>,
) -> Result<HttpResponse> {
    let (kind, z, x, y) = params.into_inner();
    let kind = match TileKind::from_str(&kind) {
        Ok(kind) => kind,
        Err(err) => return Ok(bad_request(err)),
    };
    let tile = match HttpTileService::parse_coords(&z, &x, &y) {
        Ok(tile) => tile,
        Err(err) => return Ok(bad_request(err)),
    };

    let gzip = service.config().service.compression;
    let cache_ttl = service.config().service.cache_ttl;
    let resp = match service.tile_cached(kind, tile, gzip).await {
        Ok(bytes) => {
            let mut builder = HttpResponse::Ok();
            for (key, value) in tile_headers(cache_ttl, gzip) {
                builder.insert_header((key, value));
            }
            builder.body(bytes)
        }
        Err(err @ TileError::BadCoordinates(_)) => bad_request(err),
        Err(err) => {
            error!("{}/{}/{}/{} - {}", kind.as_str(), tile.z, tile.x, tile.y, err);
            HttpResponse::InternalServerError().json(json!({
                "error": "tile generation failed",
                "details": err.to_string(),
            }))
        }
    };
    Ok(resp)
}

#[actix_web::main]
pub async fn webserver(config: ApplicationCfg) -> std::io::Result<()> {
    let host = config
        .webserver
        .bind
        .clone()
        .unwrap_or("127.0.0.1".to_string());
    let port = config.webserver.port.unwrap_or(6767);
    let bind_addr = format!("{}:{}", host, port);

    let service = HttpTileService::from_config(config)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let service = web::Data::new(service);

    info!(
        "Serving tiles at http://{}/tiles/{{kind}}/{{z}}/{{x}}/{{y}}.mvt",
        bind_addr
    );
    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(middleware::Logger::new("%r %s %b %Dms %a"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .send_wildcard()
                    .allowed_methods(vec!["GET"]),
            )
            .service(
                web::resource("/tiles/{kind}/{z}/{x}/{y}.mvt").route(
                    web::route()
                        .guard(guard::Any(guard::Get()).or(guard::Head()))
                        .to(tile_mvt),
                ),
            )
    })
    .bind(&bind_addr)?
    .shutdown_timeout(3)
    .run()
    .await
}

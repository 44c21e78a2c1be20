// HTML rendering of the dashboard page
use crate::domain::dashboard::{Dashboard, KpiTile, MapView, Notice, NoticeLevel};
use crate::domain::truck::TruckSnapshot;
use chrono::{DateTime, Utc};
use std::fmt::Write;

const MAP_WIDTH: f64 = 640.0;
const MAP_HEIGHT: f64 = 360.0;
const MAP_PADDING: f64 = 20.0;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
.kpis{display:flex;gap:1rem}.kpi{border:1px solid #ddd;border-radius:6px;padding:.8rem 1.2rem}\
.kpi .value{font-size:1.8rem;font-weight:bold}\
.notice{padding:.6rem 1rem;border-radius:4px;margin:.5rem 0}\
.success{background:#e6f4ea}.warning{background:#fff4e0}.info{background:#e8f0fe}\
table{border-collapse:collapse;font-size:.85rem}td,th{border:1px solid #ddd;padding:.25rem .5rem}\
svg{background:#f6f8fa;border:1px solid #ddd}";

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut html = String::with_capacity(16 * 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{STYLE}</style></head><body><h1>{title}</h1>",
        title = escape(&dashboard.title),
    );
    if let Some(author) = &dashboard.author {
        let _ = write!(html, "<p>Created by: <strong>{}</strong></p>", escape(author));
    }
    let _ = write!(
        html,
        "<p>{}</p><p><small>Snapshot at {}</small></p><hr>",
        escape(&dashboard.note),
        format_time(&dashboard.generated_at)
    );

    render_kpis(&mut html, &dashboard.kpis);
    html.push_str("<hr>");

    let _ = write!(html, "<h2>{}</h2>", escape(&dashboard.fleet_map.title));
    render_map(&mut html, &dashboard.fleet_map);

    let alerts = &dashboard.alerts;
    let _ = write!(html, "<h2>{}</h2>", escape(&alerts.title));
    render_notice(&mut html, &alerts.notice);
    if !alerts.trucks.is_empty() {
        render_truck_table(&mut html, &alerts.trucks);
    }

    let risk = &dashboard.risk;
    let _ = write!(html, "<h2>{}</h2>", escape(&risk.title));
    html.push_str("<table><tr><th>risk_label</th><th>count</th></tr>");
    for entry in &risk.label_counts {
        let _ = write!(html, "<tr><td>{}</td><td>{}</td></tr>", entry.label, entry.count);
    }
    html.push_str("</table><br><table><tr><th>truck_id</th><th>risk_label</th><th>risk_score</th>\
                   <th>delay_status</th><th>eta_utc</th><th>sla_deadline_utc</th></tr>");
    for row in &risk.ranking {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.truck_id),
            row.risk_label,
            row.risk_score,
            row.delay_status,
            format_time(&row.eta_utc),
            format_time(&row.sla_deadline_utc)
        );
    }
    html.push_str("</table>");

    let pickups = &dashboard.pickups;
    let _ = write!(html, "<h2>{}</h2>", escape(&pickups.title));
    if let Some(notice) = &pickups.notice {
        render_notice(&mut html, notice);
    }
    if !pickups.trucks.is_empty() {
        render_truck_table(&mut html, &pickups.trucks);
    }
    if let Some(map) = &pickups.map {
        render_map(&mut html, map);
    }

    html.push_str("</body></html>");
    html
}

fn render_kpis(html: &mut String, kpis: &[KpiTile]) {
    html.push_str("<div class=\"kpis\">");
    for kpi in kpis {
        let _ = write!(
            html,
            "<div class=\"kpi\" id=\"kpi-{}\"><div>{}</div><div class=\"value\">{}</div></div>",
            escape(&kpi.id),
            escape(&kpi.title),
            kpi.value
        );
    }
    html.push_str("</div>");
}

fn render_notice(html: &mut String, notice: &Notice) {
    let class = match notice.level {
        NoticeLevel::Success => "success",
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
    };
    let _ = write!(
        html,
        "<div class=\"notice {}\">{}</div>",
        class,
        escape(&notice.message)
    );
}

fn render_truck_table(html: &mut String, trucks: &[TruckSnapshot]) {
    html.push_str(
        "<table><tr><th>truck_id</th><th>lat</th><th>lon</th><th>speed_kmh</th>\
         <th>remaining_km</th><th>eta_utc</th><th>sla_deadline_utc</th>\
         <th>delay_minutes_vs_sla</th><th>delay_status</th><th>risk_score</th>\
         <th>risk_label</th><th>is_empty</th><th>potential_pickups_nearby</th></tr>",
    );
    for t in trucks {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{:.4}</td><td>{:.4}</td><td>{:.1}</td><td>{:.1}</td>\
             <td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td><td>{:.2}</td><td>{}</td>\
             <td>{}</td><td>{}</td></tr>",
            escape(&t.truck_id),
            t.lat,
            t.lon,
            t.speed_kmh,
            t.remaining_km,
            format_time(&t.eta_utc),
            format_time(&t.sla_deadline_utc),
            t.delay_minutes_vs_sla,
            t.delay_status,
            t.risk_score,
            t.risk_label,
            t.is_empty,
            t.potential_pickups_nearby
        );
    }
    html.push_str("</table>");
}

/// Scatter plot of positions, scaled to the bounding box of the points.
fn render_map(html: &mut String, map: &MapView) {
    let _ = write!(
        html,
        "<svg width=\"{MAP_WIDTH}\" height=\"{MAP_HEIGHT}\" viewBox=\"0 0 {MAP_WIDTH} {MAP_HEIGHT}\">"
    );

    if let Some(bounds) = Bounds::of(map) {
        for point in &map.points {
            let (x, y) = bounds.project(point.lat, point.lon);
            let _ = write!(
                html,
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"5\" fill=\"#d33\"><title>{} ({:.3}, {:.3})</title></circle>",
                x,
                y,
                escape(&point.truck_id),
                point.lat,
                point.lon
            );
        }
    }

    html.push_str("</svg>");
}

struct Bounds {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl Bounds {
    fn of(map: &MapView) -> Option<Self> {
        let first = map.points.first()?;
        let mut bounds = Bounds {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };
        for p in &map.points {
            bounds.min_lat = bounds.min_lat.min(p.lat);
            bounds.max_lat = bounds.max_lat.max(p.lat);
            bounds.min_lon = bounds.min_lon.min(p.lon);
            bounds.max_lon = bounds.max_lon.max(p.lon);
        }
        Some(bounds)
    }

    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let span = |min: f64, max: f64, v: f64| {
            if max > min { (v - min) / (max - min) } else { 0.5 }
        };
        let x = MAP_PADDING + span(self.min_lon, self.max_lon, lon) * (MAP_WIDTH - 2.0 * MAP_PADDING);
        // north is up
        let y = MAP_PADDING
            + (1.0 - span(self.min_lat, self.max_lat, lat)) * (MAP_HEIGHT - 2.0 * MAP_PADDING);
        (x, y)
    }
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

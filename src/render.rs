use serde::Serialize;
use tera::{Context, Tera};

use crate::catalog::{ApiDescriptor, Catalog};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const CATALOG_SCRIPT: &str = include_str!("../assets/catalog.js");

#[derive(Serialize)]
struct PageView<'a> {
    total: usize,
    sections: Vec<SectionView<'a>>,
    script: &'static str,
}

#[derive(Serialize)]
struct SectionView<'a> {
    name: &'a str,
    apis: Vec<CardView<'a>>,
}

#[derive(Serialize)]
struct CardView<'a> {
    id: &'a str,
    title: &'a str,
    icon: &'a str,
    url: &'a str,
    desc: &'a str,
    search_text: String,
}

impl<'a> From<&'a ApiDescriptor> for CardView<'a> {
    fn from(api: &'a ApiDescriptor) -> Self {
        Self {
            id: api.id,
            title: api.title,
            icon: api.icon,
            url: api.url,
            desc: api.description,
            search_text: format!("{} {} {} {}", api.id, api.title, api.description, api.url)
                .to_lowercase(),
        }
    }
}

pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        // the .html suffix turns on autoescaping
        tera.add_raw_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { tera })
    }

    pub fn render(&self, catalog: &Catalog) -> tera::Result<String> {
        let view = PageView {
            total: catalog.count(),
            sections: catalog
                .groups()
                .map(|(name, apis)| SectionView {
                    name,
                    apis: apis.iter().map(CardView::from).collect(),
                })
                .collect(),
            script: CATALOG_SCRIPT,
        };
        self.tera.render("index.html", &Context::from_serialize(&view)?)
    }
}

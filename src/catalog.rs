use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// One published API endpoint. `url` is an example only and is never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub url: &'static str,
    #[serde(rename = "desc")]
    pub description: &'static str,
    #[serde(skip)]
    pub group: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("descriptor id must not be empty")]
    EmptyId,

    #[error("duplicate descriptor id: {0}")]
    DuplicateId(&'static str),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<ApiDescriptor>,
}

impl Catalog {
    pub fn new(entries: Vec<ApiDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
        }
        Ok(Self { entries })
    }

    /// The compiled-in catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        let entries = BUILTIN
            .iter()
            .flat_map(|&(group, apis)| {
                apis.iter().map(move |&(id, title, icon, url, description)| ApiDescriptor {
                    id,
                    title,
                    icon,
                    url,
                    description,
                    group,
                })
            })
            .collect();
        Self::new(entries)
    }

    pub fn all(&self) -> &[ApiDescriptor] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Consecutive runs of entries sharing a group, in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = (&'static str, &[ApiDescriptor])> {
        self.entries
            .chunk_by(|a, b| a.group == b.group)
            .map(|run| (run[0].group, run))
    }
}

// (id, title, icon, url, description)
type Row = (&'static str, &'static str, &'static str, &'static str, &'static str);

const BUILTIN: &[(&str, &[Row])] = &[
    ("Hava ve Coğrafya", &[
        ("open_meteo", "Open-Meteo Hava Tahmini", "🌤️",
         "https://api.open-meteo.com/v1/forecast?latitude=41.01&longitude=28.98&current_weather=true",
         "Koordinat ile anlık hava durumu."),
        ("geocoding", "Open-Meteo Geocoding", "📍",
         "https://geocoding-api.open-meteo.com/v1/search?name=Istanbul&count=1",
         "Yer adından koordinat bulma."),
        ("sunrise_sunset", "Gün Doğumu / Batımı", "🌅",
         "https://api.sunrise-sunset.org/json?lat=41.01&lng=28.98",
         "Koordinat için gün doğumu ve batımı saatleri."),
        ("zippopotam", "Zippopotam Posta Kodu", "📮",
         "https://api.zippopotam.us/us/90210",
         "Posta kodundan yer bilgisi."),
        ("rest_countries", "REST Countries", "🌍",
         "https://restcountries.com/v3.1/name/turkey",
         "Ülke adı ile başkent, nüfus ve para birimi."),
        ("worldtime", "İstanbul Yerel Saati", "🕰️",
         "https://worldtimeapi.org/api/timezone/Europe/Istanbul",
         "Saat dilimine göre yerel saat."),
        ("holidays", "Türkiye Resmî Tatilleri", "🎉",
         "https://date.nager.at/api/v3/PublicHolidays/2025/TR",
         "Ülke ve yıl için resmî tatil listesi."),
        ("earthquakes", "USGS Depremler", "🌋",
         "https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson&limit=10",
         "Son depremler GeoJSON olarak."),
    ]),
    ("Finans", &[
        ("frankfurter", "Döviz Kurları", "💱",
         "https://api.frankfurter.app/latest?from=EUR&to=TRY",
         "ECB kaynaklı güncel döviz kurları."),
        ("coingecko", "CoinGecko Fiyat", "🪙",
         "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd",
         "Kripto para anlık fiyatı."),
        ("coinbase_rates", "Coinbase Kurlar", "💵",
         "https://api.coinbase.com/v2/exchange-rates?currency=BTC",
         "Bir para birimine göre kur tablosu."),
    ]),
    ("Bilgi ve Kaynak", &[
        ("wikipedia", "Wikipedia Özet", "📚",
         "https://en.wikipedia.org/api/rest_v1/page/summary/Rust_(programming_language)",
         "Makale başlığı ile kısa özet."),
        ("dictionary", "Sözlük", "📖",
         "https://api.dictionaryapi.dev/api/v2/entries/en/hello",
         "İngilizce kelime anlamı ve telaffuz."),
        ("openlibrary_search", "Open Library Arama", "📕",
         "https://openlibrary.org/search.json?q=the+lord+of+the+rings",
         "Kitap adı ile arama."),
        ("openlibrary_isbn", "Open Library ISBN", "🔖",
         "https://openlibrary.org/isbn/9780140328721.json",
         "ISBN ile kitap kaydı."),
        ("crossref", "Crossref Yayınlar", "🎓",
         "https://api.crossref.org/works?query=rust+language&rows=5",
         "Akademik yayın meta verisi."),
        ("arxiv", "arXiv Makaleler", "🧾",
         "https://export.arxiv.org/api/query?search_query=all:rust&max_results=5",
         "Ön baskı makale araması (Atom)."),
        ("universities", "Üniversiteler", "🏫",
         "http://universities.hipolabs.com/search?country=Turkey",
         "Ülkeye göre üniversite listesi."),
        ("artic", "Art Institute of Chicago", "🎨",
         "https://api.artic.edu/api/v1/artworks/search?q=cats",
         "Müze koleksiyonunda eser araması."),
        ("tvmaze", "TVmaze Dizi Arama", "📺",
         "https://api.tvmaze.com/search/shows?q=girls",
         "Dizi adı ile arama."),
    ]),
    ("İsim İstatistikleri", &[
        ("agify", "Agify", "🎂",
         "https://api.agify.io?name=michael",
         "İsme göre tahmini yaş istatistiği."),
        ("genderize", "Genderize", "⚧️",
         "https://api.genderize.io?name=peter",
         "İsme göre cinsiyet dağılımı istatistiği."),
        ("nationalize", "Nationalize", "🧭",
         "https://api.nationalize.io?name=nathaniel",
         "İsme göre ülke dağılımı istatistiği."),
    ]),
    ("Geliştirici Araçları", &[
        ("github_user", "GitHub Kullanıcı", "🐙",
         "https://api.github.com/users/octocat",
         "Herkese açık GitHub profili."),
        ("github_repo", "GitHub Depo", "⭐",
         "https://api.github.com/repos/rust-lang/rust",
         "Depo istatistikleri."),
        ("crates_io", "crates.io Paket", "📦",
         "https://crates.io/api/v1/crates/serde",
         "Rust paket bilgisi."),
        ("npm", "npm Registry", "🧰",
         "https://registry.npmjs.org/express/latest",
         "npm paketinin son sürümü."),
        ("pypi", "PyPI Paket", "🐍",
         "https://pypi.org/pypi/requests/json",
         "Python paket bilgisi."),
        ("httpbin", "httpbin GET", "🧪",
         "https://httpbin.org/get?foo=bar",
         "İsteği olduğu gibi geri döner."),
        ("jsonplaceholder", "JSONPlaceholder", "🗂️",
         "https://jsonplaceholder.typicode.com/posts/1",
         "Sahte REST verisi."),
        ("ipify", "ipify", "🌐",
         "https://api.ipify.org?format=json",
         "İstemcinin dış IP adresi."),
        ("randomuser", "Random User", "👤",
         "https://randomuser.me/api/?results=1",
         "Test için uydurma kullanıcı profili."),
    ]),
    ("Bilim ve Uzay", &[
        ("iss_now", "ISS Konumu", "🛰️",
         "http://api.open-notify.org/iss-now.json",
         "Uluslararası Uzay İstasyonu'nun anlık konumu."),
        ("astros", "Uzaydaki İnsanlar", "👩‍🚀",
         "http://api.open-notify.org/astros.json",
         "Şu an uzayda bulunan astronotlar."),
        ("spacex", "SpaceX Son Fırlatma", "🚀",
         "https://api.spacexdata.com/v4/launches/latest",
         "En son fırlatma kaydı."),
        ("nasa_apod", "NASA Günün Fotoğrafı", "🌌",
         "https://api.nasa.gov/planetary/apod?api_key=DEMO_KEY",
         "Günün astronomi fotoğrafı."),
    ]),
    ("Eğlence", &[
        ("pokeapi", "PokéAPI", "⚡",
         "https://pokeapi.co/api/v2/pokemon/pikachu",
         "Pokémon bilgisi."),
        ("dog_ceo", "Rastgele Köpek", "🐶",
         "https://dog.ceo/api/breeds/image/random",
         "Rastgele köpek fotoğrafı."),
        ("catfact", "Kedi Bilgisi", "🐱",
         "https://catfact.ninja/fact",
         "Rastgele kedi bilgisi."),
        ("chucknorris", "Chuck Norris Şakası", "🥋",
         "https://api.chucknorris.io/jokes/random",
         "Rastgele şaka."),
        ("joke", "Günün Şakası", "😂",
         "https://official-joke-api.appspot.com/random_joke",
         "Soru cevap şeklinde şaka."),
        ("deck", "İskambil Destesi", "🃏",
         "https://deckofcardsapi.com/api/deck/new/shuffle/?deck_count=1",
         "Karıştırılmış yeni deste."),
        ("trivia", "Open Trivia", "❓",
         "https://opentdb.com/api.php?amount=5",
         "Rastgele bilgi yarışması soruları."),
    ]),
];

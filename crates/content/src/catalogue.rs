//! Static sections of the home page: hero, welcome, programs, statistics, partners.

use once_cell::sync::Lazy;
use serde::Serialize;

static CATALOGUE: Lazy<SiteCatalogue> = Lazy::new(SiteCatalogue::build);

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub tagline: String,
    pub image: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub heading: String,
    pub portrait: String,
    pub paragraphs: Vec<String>,
}

/// A study program (jurusan).
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    pub image: String,
    pub description: String,
    pub competencies: Vec<String>,
    pub accent: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Statistic {
    pub label: String,
    pub value: String,
}

/// Percentage statistic rendered as a progress bar.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RateStatistic {
    pub label: String,
    pub percent: u8,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Statistics {
    pub totals: Vec<Statistic>,
    pub rates: Vec<RateStatistic>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Partner {
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SiteCatalogue {
    pub hero: Hero,
    pub about: About,
    pub programs: Vec<Program>,
    pub statistics: Statistics,
    pub partners: Vec<Partner>,
}

impl SiteCatalogue {
    pub fn get() -> &'static SiteCatalogue {
        &CATALOGUE
    }

    fn build() -> Self {
        Self {
            hero: Hero {
                title: "SMK Negeri 4 Bogor".to_string(),
                tagline: "Unggul dalam Prestasi, Berkarakter, dan Berwawasan Lingkungan"
                    .to_string(),
                image: "/r-tkj.jpg".to_string(),
                call_to_action: "Jelajahi".to_string(),
            },
            about: About {
                heading: "Sambutan Kepala Sekolah".to_string(),
                portrait: "/kepala-sekolah.jpg".to_string(),
                paragraphs: strings(&[
                    "Selamat datang di website resmi SMKN 4 Bogor. Sebagai lembaga pendidikan kejuruan, \
                     kami berkomitmen untuk menghasilkan lulusan yang kompeten, berkarakter, dan siap \
                     menghadapi tantangan dunia kerja modern.",
                    "Dengan dukungan fasilitas modern dan tenaga pengajar profesional, kami terus berinovasi \
                     dalam memberikan pendidikan berkualitas bagi generasi penerus bangsa.",
                ]),
            },
            programs: vec![
                program(
                    1,
                    "Pengembangan Perangkat Lunak dan Gim",
                    "PPLG",
                    "/pplg.png",
                    "Program keahlian yang fokus pada pengembangan aplikasi, web, mobile, dan game. \
                     Siswa akan mempelajari berbagai bahasa pemrograman dan teknologi terkini.",
                    &[
                        "Pemrograman Web Frontend & Backend",
                        "Mobile App Development",
                        "Game Development",
                        "Database Management",
                        "UI/UX Design",
                    ],
                    "from-blue-500/20 to-cyan-500/20",
                ),
                program(
                    2,
                    "Teknik Jaringan Komputer dan Telekomunikasi",
                    "TJKT",
                    "/tjkt.png",
                    "Program keahlian yang mempelajari tentang jaringan komputer, administrasi server, \
                     dan sistem telekomunikasi modern.",
                    &[
                        "Instalasi dan Konfigurasi Jaringan",
                        "Administrasi Server",
                        "Keamanan Jaringan",
                        "Cloud Computing",
                        "Sistem Telekomunikasi",
                    ],
                    "from-purple-500/20 to-pink-500/20",
                ),
                program(
                    3,
                    "Teknik Otomotif",
                    "TO",
                    "/to.png",
                    "Program keahlian yang mempelajari tentang perawatan dan perbaikan kendaraan \
                     bermotor dengan teknologi terkini.",
                    &[
                        "Perawatan Mesin Kendaraan",
                        "Sistem Kelistrikan Otomotif",
                        "Teknologi Motor Listrik",
                        "Diagnosa Kerusakan",
                        "Sistem Kontrol Elektronik",
                    ],
                    "from-orange-500/20 to-red-500/20",
                ),
                program(
                    4,
                    "Teknik Pengelasan",
                    "TP",
                    "/tp.jpeg",
                    "Program keahlian yang mempelajari berbagai teknik pengelasan modern dan \
                     fabrikasi logam sesuai standar industri.",
                    &[
                        "Las SMAW",
                        "Las MIG/MAG",
                        "Las TIG",
                        "Fabrikasi Logam",
                        "Keselamatan Kerja",
                    ],
                    "from-red-500/20 to-yellow-500/20",
                ),
            ],
            statistics: Statistics {
                totals: vec![
                    statistic("Total Siswa", "1200+"),
                    statistic("Tenaga Pengajar", "80+"),
                    statistic("Alumni", "5000+"),
                    statistic("Mitra Industri", "50+"),
                ],
                rates: vec![
                    RateStatistic {
                        label: "Tingkat Kelulusan".to_string(),
                        percent: 98,
                    },
                    RateStatistic {
                        label: "Tingkat Penyerapan Kerja".to_string(),
                        percent: 85,
                    },
                ],
            },
            partners: vec![
                partner("Bonet", "/bonet.png"),
                partner("Honda", "/honda.svg"),
                partner("Komatsu", "/komatsu.svg"),
                partner("IconNet", "/iconnet.png"),
            ],
        }
    }

    pub fn program(&self, abbreviation: &str) -> Option<&Program> {
        self.programs
            .iter()
            .find(|program| program.abbreviation.eq_ignore_ascii_case(abbreviation))
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn program(
    id: u32,
    name: &str,
    abbreviation: &str,
    image: &str,
    description: &str,
    competencies: &[&str],
    accent: &str,
) -> Program {
    Program {
        id,
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        image: image.to_string(),
        description: description.to_string(),
        competencies: strings(competencies),
        accent: accent.to_string(),
    }
}

fn statistic(label: &str, value: &str) -> Statistic {
    Statistic {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn partner(name: &str, logo: &str) -> Partner {
    Partner {
        name: name.to_string(),
        logo: logo.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_lists_four_programs_with_competencies() {
        let catalogue = SiteCatalogue::get();
        assert_eq!(catalogue.programs.len(), 4);
        assert!(catalogue
            .programs
            .iter()
            .all(|program| program.competencies.len() == 5));
        assert_eq!(catalogue.program("pplg").map(|p| p.id), Some(1));
        assert!(catalogue.program("XYZ").is_none());
    }

    #[test]
    fn rates_are_percentages() {
        let statistics = &SiteCatalogue::get().statistics;
        assert!(statistics.rates.iter().all(|rate| rate.percent <= 100));
        assert_eq!(statistics.totals.len(), 4);
    }
}

//! English to Spanish label vocabulary for the local detection pipeline.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static TRANSLATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("person", "persona"),
        ("bicycle", "bicicleta"),
        ("car", "automóvil"),
        ("motorcycle", "motocicleta"),
        ("airplane", "avión"),
        ("bus", "autobús"),
        ("train", "tren"),
        ("truck", "camión"),
        ("boat", "barco"),
        ("traffic light", "semáforo"),
        ("fire hydrant", "hidrante"),
        ("stop sign", "señal de alto"),
        ("parking meter", "parquímetro"),
        ("bench", "banco"),
        ("bird", "pájaro"),
        ("cat", "gato"),
        ("dog", "perro"),
        ("horse", "caballo"),
        ("sheep", "oveja"),
        ("cow", "vaca"),
        ("elephant", "elefante"),
        ("bear", "oso"),
        ("zebra", "cebra"),
        ("giraffe", "jirafa"),
        ("backpack", "mochila"),
        ("umbrella", "paraguas"),
        ("handbag", "bolso"),
        ("tie", "corbata"),
        ("suitcase", "maleta"),
        ("frisbee", "frisbee"),
        ("skis", "esquíes"),
        ("snowboard", "tabla de nieve"),
        ("sports ball", "pelota"),
        ("kite", "cometa"),
        ("baseball bat", "bate de béisbol"),
        ("baseball glove", "guante de béisbol"),
        ("skateboard", "patineta"),
        ("surfboard", "tabla de surf"),
        ("tennis racket", "raqueta de tenis"),
        ("bottle", "botella"),
        ("wine glass", "copa de vino"),
        ("cup", "taza"),
        ("fork", "tenedor"),
        ("knife", "cuchillo"),
        ("spoon", "cuchara"),
        ("bowl", "tazón"),
        ("banana", "plátano"),
        ("apple", "manzana"),
        ("sandwich", "sándwich"),
        ("orange", "naranja"),
        ("broccoli", "brócoli"),
        ("carrot", "zanahoria"),
        ("hot dog", "perro caliente"),
        ("pizza", "pizza"),
        ("donut", "dona"),
        ("cake", "pastel"),
        ("chair", "silla"),
        ("couch", "sofá"),
        ("potted plant", "planta en maceta"),
        ("bed", "cama"),
        ("dining table", "mesa de comedor"),
        ("toilet", "inodoro"),
        ("tv", "televisión"),
        ("laptop", "laptop"),
        ("mouse", "ratón"),
        ("remote", "control remoto"),
        ("keyboard", "teclado"),
        ("cell phone", "teléfono celular"),
        ("microwave", "microondas"),
        ("oven", "horno"),
        ("toaster", "tostadora"),
        ("sink", "fregadero"),
        ("refrigerator", "refrigerador"),
        ("book", "libro"),
        ("clock", "reloj"),
        ("vase", "jarrón"),
        ("scissors", "tijeras"),
        ("teddy bear", "osito de peluche"),
        ("hair drier", "secadora de pelo"),
        ("toothbrush", "cepillo de dientes"),
    ])
});

/// Translate a detector label to Spanish.
///
/// Unknown labels pass through lowercased so the announcement still names
/// them instead of dropping the detection.
pub fn translate(label: &str) -> String {
    let key = label.to_lowercase();
    match TRANSLATIONS.get(key.as_str()) {
        Some(es) => (*es).to_string(),
        None => key,
    }
}

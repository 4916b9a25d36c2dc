//! テスト用ユーティリティ
//!
//! 小さなロシア語辞書と、それを使う問い合わせのヘルパーを提供します。
//!
//! グラメムIDと品詞は次のとおりです:
//! 2=主格 3=生格 4=与格 5=対格 6=造格 10=単数 11=複数 12=女性 13=男性
//! 20=不定形 21=過去 30=最上級 / 品詞 1=名詞 2=動詞 3=形容詞

use crate::dictionary::Dictionary;
use crate::query::{OutputModes, QueryOptions, QueryPipeline};

pub(crate) const PARADIGMS_CSV: &str = "\
# paradigm,form,prefix,ending,pos,grammemes
0,0,,а,1,\",2,10,12,\"
0,1,,и,1,\",3,10,12,\"
0,2,,е,1,\",4,10,12,\"
0,3,,у,1,\",5,10,12,\"
0,4,,и,1,\",2,11,12,\"
0,5,,,1,\",3,11,12,\"
1,0,,ь,1,\",2,10,12,\"
1,1,,и,1,\",3,10,12,\"
1,2,,ью,1,\",6,10,12,\"
2,0,,ть,2,\",20,\"
2,1,,л,2,\",10,13,21,\"
2,2,,ла,2,\",10,12,21,\"
2,3,,ли,2,\",11,21,\"
3,0,,,1,\",2,10,13,\"
3,1,,а,1,\",3,10,13,\"
3,2,,у,1,\",4,10,13,\"
3,3,,ы,1,\",2,11,13,\"
4,0,,ий,3,\",2,10,13,\"
4,1,наи,ий,3,\",2,10,13,30,\"
";

pub(crate) const DICT_CSV: &str = "\
# word,paradigm,form
книга,0,0
книги,0,1
книге,0,2
книгу,0,3
книг,0,5
сталь,1,0
стали,1,1
стали,2,3
сталью,1,2
стать,2,0
стал,2,1
стала,2,2
стол,3,0
стола,3,1
столу,3,2
столы,3,3
лучший,4,0
наилучший,4,1
";

pub(crate) const PREDICTION_CSV: &str = "\
# suffix,paradigm,form
ига,0,0
иги,0,1
игу,0,3
ол,3,0
ала,2,2
";

#[track_caller]
pub(crate) fn build_test_dictionary() -> Dictionary {
    Dictionary::from_readers(
        DICT_CSV.as_bytes(),
        PREDICTION_CSV.as_bytes(),
        PARADIGMS_CSV.as_bytes(),
    )
    .unwrap()
}

/// `words` を1語ずつ処理した出力を返します。
#[track_caller]
pub(crate) fn query(dict: &Dictionary, modes: OutputModes, use_prediction: bool, words: &[&str]) -> String {
    let options = QueryOptions::new(modes, use_prediction).unwrap();
    let pipeline = QueryPipeline::new(dict, options);
    let mut out = vec![];
    for word in words {
        pipeline.process_word(word.as_bytes(), &mut out).unwrap();
    }
    String::from_utf8(out).unwrap()
}
